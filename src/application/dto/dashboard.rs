use crate::domain::letters::letter::Letter;

#[derive(Debug, Clone)]
pub struct DashboardSummaryDto {
    pub document_count: i64,
    pub letters_today: i64,
    pub recent_letters: Vec<Letter>,
}
