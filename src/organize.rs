// Organizer: turns decoded airing records into per-day buckets keyed by
// UTC calendar date.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::decode::{AiringRecord, MediaTitle};

/// Normalized view of one aired episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInfo {
    pub title: String,
    pub episode: u32,
    pub average_score: u32,
    pub airing_time: DateTime<Utc>,
}

impl ShowInfo {
    /// `None` when the timestamp is outside the representable range.
    pub fn from_record(record: AiringRecord) -> Option<Self> {
        let airing_time = DateTime::from_timestamp(record.airing_at, 0)?;
        Some(ShowInfo {
            title: resolve_title(record.media.title),
            episode: record.episode,
            average_score: record.media.average_score,
            airing_time,
        })
    }

    /// Key of the bucket this show belongs to.
    pub fn day(&self) -> NaiveDate {
        day_key(self.airing_time)
    }
}

/// English title when present, romaji otherwise.
pub fn resolve_title(title: MediaTitle) -> String {
    if title.english.is_empty() {
        title.romaji
    } else {
        title.english
    }
}

/// UTC calendar date of an instant (time of day dropped).
pub fn day_key(at: DateTime<Utc>) -> NaiveDate {
    at.date_naive()
}

/// Shows grouped by the UTC day they aired on. Each day keeps its shows in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekSchedule {
    days: HashMap<NaiveDate, Vec<ShowInfo>>,
}

impl WeekSchedule {
    pub fn push(&mut self, show: ShowInfo) {
        self.days.entry(show.day()).or_default().push(show);
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of distinct days.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Total number of shows across all days.
    pub fn show_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn shows_on(&self, day: NaiveDate) -> &[ShowInfo] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Day keys sorted most recent first. Map iteration order is never
    /// used for output.
    pub fn days_newest_first(&self) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = self.days.keys().copied().collect();
        days.sort_unstable_by(|a, b| b.cmp(a));
        days
    }
}

impl FromIterator<ShowInfo> for WeekSchedule {
    fn from_iter<I: IntoIterator<Item = ShowInfo>>(iter: I) -> Self {
        let mut schedule = WeekSchedule::default();
        for show in iter {
            schedule.push(show);
        }
        schedule
    }
}

/// Group records by UTC airing day, preserving input order within a day.
pub fn organize_by_day(records: Vec<AiringRecord>) -> WeekSchedule {
    let schedule: WeekSchedule = records
        .into_iter()
        .filter_map(|record| {
            let airing_at = record.airing_at;
            let show = ShowInfo::from_record(record);
            if show.is_none() {
                tracing::warn!(airing_at, "skipping record with out-of-range timestamp");
            }
            show
        })
        .collect();
    tracing::debug!(
        days = schedule.day_count(),
        shows = schedule.show_count(),
        "organized shows by day"
    );
    schedule
}
