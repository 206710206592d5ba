use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::application::ports::letter_repository::{LetterInsertError, LetterRepository};
use crate::domain::letters::letter::{Letter, LetterDraft, LetterHit, format_letter_number};
use crate::infrastructure::db::DbPool;

pub struct SqlxLetterRepository {
    pub pool: DbPool,
}

impl SqlxLetterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const LETTER_COLUMNS: &str = "id, letter_number, letter_type, applicant_name, applicant_id_number, purpose, raw_payload, created_at";

fn map_letter(r: SqliteRow) -> Letter {
    Letter {
        id: r.get("id"),
        letter_number: r.get("letter_number"),
        letter_type: r.get("letter_type"),
        applicant_name: r.get("applicant_name"),
        applicant_id_number: r.get("applicant_id_number"),
        purpose: r.get("purpose"),
        raw_payload: r.get("raw_payload"),
        created_at: r.get("created_at"),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

#[async_trait]
impl LetterRepository for SqlxLetterRepository {
    async fn insert_numbered(
        &self,
        draft: &LetterDraft,
        created_at: NaiveDateTime,
    ) -> Result<Letter, LetterInsertError> {
        let day = created_at.date();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| LetterInsertError::Other(e.into()))?;

        // First allocation of a day is seeded from the letters already stored for it.
        let seq: i64 = sqlx::query_scalar(
            r#"INSERT INTO letter_counters (day, last_seq)
               VALUES (?1, (SELECT COUNT(1) FROM letters WHERE date(created_at) = ?1) + 1)
               ON CONFLICT(day) DO UPDATE SET last_seq = last_seq + 1
               RETURNING last_seq"#,
        )
        .bind(day_key(day))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| LetterInsertError::Other(e.into()))?;

        let letter_number = format_letter_number(&draft.letter_type, day, seq);
        let sql = format!(
            r#"INSERT INTO letters (letter_number, letter_type, applicant_name, applicant_id_number, purpose, raw_payload, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
               RETURNING {LETTER_COLUMNS}"#
        );
        let row = sqlx::query(&sql)
            .bind(&letter_number)
            .bind(&draft.letter_type)
            .bind(&draft.applicant_name)
            .bind(draft.applicant_id_number.as_deref())
            .bind(&draft.purpose)
            .bind(&draft.raw_payload)
            .bind(created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    LetterInsertError::NumberTaken(letter_number.clone())
                } else {
                    LetterInsertError::Other(e.into())
                }
            })?;

        tx.commit()
            .await
            .map_err(|e| LetterInsertError::Other(e.into()))?;
        Ok(map_letter(row))
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Letter>> {
        let sql = format!("SELECT {LETTER_COLUMNS} FROM letters WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(map_letter))
    }

    async fn search(&self, query: &str, limit: i64) -> anyhow::Result<Vec<LetterHit>> {
        let like = format!("%{}%", query);
        let rows = sqlx::query(
            r#"SELECT id, letter_number, applicant_name, letter_type
               FROM letters
               WHERE applicant_name LIKE ?1 OR applicant_id_number LIKE ?1 OR letter_number LIKE ?1
               ORDER BY created_at DESC, id DESC
               LIMIT ?2"#,
        )
        .bind(like)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| LetterHit {
                id: r.get("id"),
                letter_number: r.get("letter_number"),
                applicant_name: r.get("applicant_name"),
                letter_type: r.get("letter_type"),
            })
            .collect())
    }

    async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<Letter>> {
        let sql = format!(
            "SELECT {LETTER_COLUMNS} FROM letters ORDER BY created_at DESC, id DESC LIMIT ?1"
        );
        let rows = sqlx::query(&sql).bind(limit).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(map_letter).collect())
    }

    async fn count_for_day(&self, day: NaiveDate) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(1) FROM letters WHERE date(created_at) = ?1",
        )
        .bind(day_key(day))
        .fetch_one(&self.pool)
        .await?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::{connect_in_memory, migrate};

    async fn repo() -> SqlxLetterRepository {
        let pool = connect_in_memory().await.unwrap();
        migrate(&pool).await.unwrap();
        SqlxLetterRepository::new(pool)
    }

    fn draft(letter_type: &str, name: &str, nik: Option<&str>) -> LetterDraft {
        LetterDraft {
            letter_type: letter_type.into(),
            applicant_name: name.into(),
            applicant_id_number: nik.map(Into::into),
            purpose: "Beasiswa".into(),
            raw_payload: format!(r#"{{"nama_pemohon":"{name}"}}"#),
        }
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn sequence_is_dense_per_day_and_restarts() {
        let repo = repo().await;
        let a = repo.insert_numbered(&draft("sktm", "A", None), at(1, 8)).await.unwrap();
        let b = repo.insert_numbered(&draft("skd", "B", None), at(1, 9)).await.unwrap();
        let c = repo.insert_numbered(&draft("sktm", "C", None), at(1, 23)).await.unwrap();
        let d = repo.insert_numbered(&draft("sktm", "D", None), at(2, 0)).await.unwrap();

        assert_eq!(a.letter_number, "SKTM/2024-01-01/001");
        assert_eq!(b.letter_number, "SKD/2024-01-01/002");
        assert_eq!(c.letter_number, "SKTM/2024-01-01/003");
        assert_eq!(d.letter_number, "SKTM/2024-01-02/001");
        assert_eq!(repo.count_for_day(at(1, 0).date()).await.unwrap(), 3);
        assert_eq!(repo.count_for_day(at(2, 0).date()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn counter_is_seeded_from_existing_letters() {
        let repo = repo().await;
        sqlx::query(
            r#"INSERT INTO letters (letter_number, letter_type, applicant_name, purpose, raw_payload, created_at)
               VALUES ('SKTM/2024-01-05/001', 'sktm', 'Lama', '', '{}', '2024-01-05 07:00:00')"#,
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        let next = repo.insert_numbered(&draft("sktm", "Baru", None), at(5, 9)).await.unwrap();
        assert_eq!(next.letter_number, "SKTM/2024-01-05/002");
    }

    #[tokio::test]
    async fn number_collision_is_reported_and_rolled_back() {
        let repo = repo().await;
        sqlx::query(
            r#"INSERT INTO letter_counters (day, last_seq) VALUES ('2024-01-07', 0)"#,
        )
        .execute(&repo.pool)
        .await
        .unwrap();
        sqlx::query(
            r#"INSERT INTO letters (letter_number, letter_type, applicant_name, purpose, raw_payload, created_at)
               VALUES ('SKTM/2024-01-07/001', 'sktm', 'Lama', '', '{}', '2024-01-06 23:59:59')"#,
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        let err = repo
            .insert_numbered(&draft("sktm", "X", None), at(7, 8))
            .await
            .unwrap_err();
        assert!(matches!(err, LetterInsertError::NumberTaken(ref n) if n == "SKTM/2024-01-07/001"));

        let last: i64 = sqlx::query_scalar("SELECT last_seq FROM letter_counters WHERE day = '2024-01-07'")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(last, 0);
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_unknown() {
        let repo = repo().await;
        let saved = repo
            .insert_numbered(&draft("sku", "Usaha", Some("3201")), at(3, 10))
            .await
            .unwrap();
        let found = repo.get_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.letter_number, saved.letter_number);
        assert_eq!(found.applicant_id_number.as_deref(), Some("3201"));
        assert_eq!(found.created_at, at(3, 10));
        assert!(repo.get_by_id(saved.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_orders_newest_first_and_caps() {
        let repo = repo().await;
        repo.insert_numbered(&draft("sktm", "Siti", Some("111")), at(1, 8)).await.unwrap();
        repo.insert_numbered(&draft("sktm", "Siti Aminah", None), at(2, 8)).await.unwrap();
        repo.insert_numbered(&draft("skd", "Budi", Some("222")), at(3, 8)).await.unwrap();

        let hits = repo.search("Siti", 20).await.unwrap();
        let numbers: Vec<&str> = hits.iter().map(|h| h.letter_number.as_str()).collect();
        assert_eq!(numbers, vec!["SKTM/2024-01-02/001", "SKTM/2024-01-01/001"]);

        let by_number = repo.search("SKD/", 20).await.unwrap();
        assert_eq!(by_number.len(), 1);
        assert_eq!(by_number[0].applicant_name, "Budi");

        let by_nik = repo.search("22", 20).await.unwrap();
        assert_eq!(by_nik.len(), 1);

        for i in 0..25 {
            repo.insert_numbered(&draft("sktm", &format!("Warga {i}"), None), at(4, 8))
                .await
                .unwrap();
        }
        assert_eq!(repo.search("Warga", 20).await.unwrap().len(), 20);
        assert_eq!(repo.list_recent(5).await.unwrap().len(), 5);
    }
}
