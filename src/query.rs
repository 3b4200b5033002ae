// Query builder: the rolling airing window and the GraphQL document that
// asks for every episode broadcast inside it.

use chrono::{DateTime, TimeDelta, Utc};

/// Length of the rolling window, in days.
pub const WINDOW_DAYS: i64 = 7;

/// Single page size. Older entries beyond it are not fetched.
pub const PER_PAGE: u32 = 100;

/// Time range `(start, end)` in UTC epoch seconds. Both bounds are exclusive
/// on the API side (`airingAt_greater` / `airingAt_lesser`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiringWindow {
    pub start: i64,
    pub end: i64,
}

impl AiringWindow {
    /// The seven days ending at `now`.
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        let start = now - TimeDelta::days(WINDOW_DAYS);
        AiringWindow {
            start: start.timestamp(),
            end: now.timestamp(),
        }
    }

    /// GraphQL document for the newest `PER_PAGE` airing schedules in this
    /// window, sorted by airing time descending.
    pub fn query(&self) -> String {
        format!(
            r#"
{{
  Page(perPage: {per_page}) {{
    pageInfo {{
      hasNextPage
    }}
    airingSchedules(airingAt_greater: {start}, airingAt_lesser: {end}, sort: TIME_DESC) {{
      episode
      airingAt
      media {{
        title {{
          romaji
          english
        }}
        averageScore
      }}
    }}
  }}
}}
"#,
            per_page = PER_PAGE,
            start = self.start,
            end = self.end,
        )
    }
}
