// Driver: one linear pass from query to organized schedule.

use chrono::{DateTime, Utc};

use crate::api::{encode_request, Transport};
use crate::decode::decode_page;
use crate::error::ReportError;
use crate::organize::{organize_by_day, WeekSchedule};
use crate::query::{AiringWindow, PER_PAGE};

/// Successful outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Nothing aired in the window.
    NoEpisodes,
    Schedule(WeekSchedule),
}

/// Fetch the week ending at `now` through `transport` and group it by day.
/// Stops at the first failing stage.
pub fn run<T: Transport>(transport: &T, now: DateTime<Utc>) -> Result<Report, ReportError> {
    let window = AiringWindow::ending_at(now);
    tracing::debug!(start = window.start, end = window.end, "airing window");

    let payload = encode_request(&window.query())?;
    let body = transport.post_json(payload)?;
    let page = decode_page(&body)?;
    if page.page_info.has_next_page {
        tracing::warn!(
            per_page = PER_PAGE,
            "more episodes aired than fit on one page; older entries are omitted"
        );
    }

    let schedule = organize_by_day(page.airing_schedules);
    if schedule.is_empty() {
        Ok(Report::NoEpisodes)
    } else {
        Ok(Report::Schedule(schedule))
    }
}
