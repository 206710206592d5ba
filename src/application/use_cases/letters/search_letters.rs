use crate::application::ports::letter_repository::LetterRepository;
use crate::application::use_cases::SEARCH_LIMIT;
use crate::domain::letters::letter::LetterHit;

pub struct SearchLetters<'a, R: LetterRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LetterRepository + ?Sized> SearchLetters<'a, R> {
    pub async fn execute(&self, q: Option<String>) -> anyhow::Result<Vec<LetterHit>> {
        let q = q.unwrap_or_default();
        let q = q.trim();
        if q.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.search(q, SEARCH_LIMIT).await
    }
}
