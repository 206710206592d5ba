use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::application::ports::archive_repository::ArchiveRepository;
use crate::domain::archive::document::{ArchivedDocument, DocumentHit, NewArchivedDocument};
use crate::infrastructure::db::DbPool;

pub struct SqlxArchiveRepository {
    pub pool: DbPool,
}

impl SqlxArchiveRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_document(r: SqliteRow) -> ArchivedDocument {
    ArchivedDocument {
        id: r.get("id"),
        archive_name: r.get("archive_name"),
        document_name: r.get("document_name"),
        id_number: r.get("id_number"),
        category: r.get("category"),
        uploaded_at: r.get("uploaded_at"),
    }
}

#[async_trait]
impl ArchiveRepository for SqlxArchiveRepository {
    async fn list_all(&self) -> anyhow::Result<Vec<ArchivedDocument>> {
        let rows = sqlx::query(
            r#"SELECT id, archive_name, document_name, id_number, category, uploaded_at
               FROM documents
               ORDER BY uploaded_at DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_document).collect())
    }

    async fn insert(&self, doc: &NewArchivedDocument) -> anyhow::Result<ArchivedDocument> {
        let row = sqlx::query(
            r#"INSERT INTO documents (archive_name, document_name, id_number, category, uploaded_at)
               VALUES (?1, ?2, ?3, ?4, ?5)
               RETURNING id, archive_name, document_name, id_number, category, uploaded_at"#,
        )
        .bind(&doc.archive_name)
        .bind(&doc.document_name)
        .bind(doc.id_number.as_deref())
        .bind(&doc.category)
        .bind(doc.uploaded_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_document(row))
    }

    async fn search(&self, query: &str, limit: i64) -> anyhow::Result<Vec<DocumentHit>> {
        let like = format!("%{}%", query);
        let rows = sqlx::query(
            r#"SELECT archive_name, document_name, category
               FROM documents
               WHERE document_name LIKE ?1 OR id_number LIKE ?1 OR category LIKE ?1
               LIMIT ?2"#,
        )
        .bind(like)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| DocumentHit {
                archive_name: r.get("archive_name"),
                document_name: r.get("document_name"),
                category: r.get("category"),
            })
            .collect())
    }

    async fn count(&self) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM documents")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::{connect_in_memory, migrate};
    use chrono::{NaiveDate, NaiveDateTime};

    async fn repo() -> SqlxArchiveRepository {
        let pool = connect_in_memory().await.unwrap();
        migrate(&pool).await.unwrap();
        SqlxArchiveRepository::new(pool)
    }

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(10, minute, 0)
            .unwrap()
    }

    fn new_doc(
        archive_name: &str,
        name: &str,
        nik: Option<&str>,
        category: &str,
        minute: u32,
    ) -> NewArchivedDocument {
        NewArchivedDocument {
            archive_name: archive_name.into(),
            document_name: name.into(),
            id_number: nik.map(Into::into),
            category: category.into(),
            uploaded_at: at(minute),
        }
    }

    #[tokio::test]
    async fn insert_round_trips_metadata() {
        let repo = repo().await;
        let saved = repo
            .insert(&new_doc("KTP_BUDI_20240502_100000.jpg", "Budi", Some("3201"), "KTP", 0))
            .await
            .unwrap();
        assert!(saved.id > 0);
        assert_eq!(saved.document_name, "Budi");
        assert_eq!(saved.id_number.as_deref(), Some("3201"));
        assert_eq!(saved.category, "KTP");
        assert_eq!(saved.uploaded_at, at(0));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = repo().await;
        repo.insert(&new_doc("a.pdf", "A", None, "KK", 1)).await.unwrap();
        repo.insert(&new_doc("b.pdf", "B", None, "KK", 3)).await.unwrap();
        repo.insert(&new_doc("c.pdf", "C", None, "KK", 2)).await.unwrap();
        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.archive_name)
            .collect();
        assert_eq!(names, vec!["b.pdf", "c.pdf", "a.pdf"]);
    }

    #[tokio::test]
    async fn duplicate_archive_name_is_rejected() {
        let repo = repo().await;
        repo.insert(&new_doc("same.pdf", "A", None, "KK", 1)).await.unwrap();
        assert!(repo.insert(&new_doc("same.pdf", "B", None, "KK", 1)).await.is_err());
    }

    #[tokio::test]
    async fn search_matches_any_column_and_caps_results() {
        let repo = repo().await;
        repo.insert(&new_doc("x.pdf", "Akta Siti", None, "AKTA", 0)).await.unwrap();
        repo.insert(&new_doc("y.pdf", "Budi", Some("3201990001"), "KTP", 1)).await.unwrap();
        for i in 0..25 {
            let name = format!("Warga {i}");
            repo.insert(&new_doc(&format!("kk{i}.pdf"), &name, None, "KK", 2))
                .await
                .unwrap();
        }

        let by_name = repo.search("Siti", 20).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].archive_name, "x.pdf");

        let by_nik = repo.search("9900", 20).await.unwrap();
        assert_eq!(by_nik.len(), 1);
        assert_eq!(by_nik[0].document_name, "Budi");

        let by_category = repo.search("KK", 20).await.unwrap();
        assert_eq!(by_category.len(), 20);
        assert_eq!(repo.count().await.unwrap(), 27);
    }
}
