use chrono::NaiveDate;

use crate::application::dto::dashboard::DashboardSummaryDto;
use crate::application::ports::archive_repository::ArchiveRepository;
use crate::application::ports::letter_repository::LetterRepository;

const RECENT_LETTERS: i64 = 5;

pub struct DashboardSummary<'a, A, L>
where
    A: ArchiveRepository + ?Sized,
    L: LetterRepository + ?Sized,
{
    pub archive: &'a A,
    pub letters: &'a L,
}

impl<'a, A, L> DashboardSummary<'a, A, L>
where
    A: ArchiveRepository + ?Sized,
    L: LetterRepository + ?Sized,
{
    pub async fn execute(&self, today: NaiveDate) -> anyhow::Result<DashboardSummaryDto> {
        Ok(DashboardSummaryDto {
            document_count: self.archive.count().await?,
            letters_today: self.letters.count_for_day(today).await?,
            recent_letters: self.letters.list_recent(RECENT_LETTERS).await?,
        })
    }
}
