use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::letters::letter::{Letter, LetterDraft, LetterHit};

#[derive(thiserror::Error, Debug)]
pub enum LetterInsertError {
    #[error("letter number {0} is already taken")]
    NumberTaken(String),
    #[error("failed to persist letter")]
    Other(#[source] anyhow::Error),
}

#[async_trait]
pub trait LetterRepository: Send + Sync {
    /// Allocates the next sequence number for the calendar day of `created_at`
    /// and inserts the letter in one transaction.
    async fn insert_numbered(
        &self,
        draft: &LetterDraft,
        created_at: NaiveDateTime,
    ) -> Result<Letter, LetterInsertError>;

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Letter>>;

    /// Substring match on applicant name, id number and letter number, newest first.
    async fn search(&self, query: &str, limit: i64) -> anyhow::Result<Vec<LetterHit>>;

    async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<Letter>>;

    async fn count_for_day(&self, day: NaiveDate) -> anyhow::Result<i64>;
}
