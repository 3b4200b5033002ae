// UI layer: renders the weekly schedule as styled terminal text.
// Everything here is a pure function of its inputs plus a `Theme`, so the
// output can be checked in tests with the plain theme and no terminal.

use std::fmt::Display;

use chrono::NaiveDate;
use console::measure_text_width;
use crossterm::style::{Attribute, Color, ContentStyle};
use crossterm::tty::IsTty;

use crate::organize::{ShowInfo, WeekSchedule};
use crate::pipeline::Report;

// Neon palette
const PRIMARY: Color = Color::Rgb { r: 0xFF, g: 0x5F, b: 0xEF };
const SECONDARY: Color = Color::Rgb { r: 0x00, g: 0xF8, b: 0xD4 };
const ACCENT: Color = Color::Rgb { r: 0xBD, g: 0x93, b: 0xFF };
const TEXT: Color = Color::Rgb { r: 0xE0, g: 0xE0, b: 0xE0 };
const SUBTLE: Color = Color::Rgb { r: 0xA0, g: 0xA0, b: 0xA0 };
const HIGHLIGHT: Color = Color::Rgb { r: 0xFF, g: 0xB8, b: 0x6C };
const DIM: Color = Color::Rgb { r: 0x44, g: 0x44, b: 0x44 };
const ALERT: Color = Color::Rgb { r: 0xFF, g: 0x6B, b: 0x6B };

const DIVIDER: &str = "╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌";

/// Message shown instead of a report when nothing aired in the window.
pub const NO_EPISODES: &str = "✨ No new episodes aired in the past week ✨";

/// Label used in place of `0/100`.
pub const NO_RATING: &str = "No rating";

/// Frame padding: blank lines above/below, columns left/right.
const PAD_Y: usize = 1;
const PAD_X: usize = 2;

/// Score above which a show gets the strong marker.
const STRONG_SCORE: u32 = 75;

/// Formatting configuration handed to every render function. Holds no
/// terminal state; `colored: false` yields plain text.
#[derive(Debug, Clone)]
pub struct Theme {
    pub colored: bool,
    pub title: ContentStyle,
    pub episode: ContentStyle,
    pub time: ContentStyle,
    pub score: ContentStyle,
    pub no_score: ContentStyle,
    pub separator: ContentStyle,
    pub day_header: ContentStyle,
    pub divider: ContentStyle,
    pub border: ContentStyle,
    pub text: ContentStyle,
    pub error: ContentStyle,
}

fn style(fg: Color, attributes: &[Attribute]) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = Some(fg);
    for attribute in attributes {
        style.attributes.set(*attribute);
    }
    style
}

impl Theme {
    /// Colored theme for interactive terminals.
    pub fn neon() -> Self {
        Theme {
            colored: true,
            title: style(PRIMARY, &[Attribute::Bold]),
            episode: style(SECONDARY, &[Attribute::Bold]),
            time: style(SUBTLE, &[]),
            score: style(HIGHLIGHT, &[]),
            no_score: style(SUBTLE, &[Attribute::Italic]),
            separator: style(SUBTLE, &[]),
            day_header: style(ACCENT, &[Attribute::Bold, Attribute::Underlined]),
            divider: style(DIM, &[]),
            border: style(ACCENT, &[]),
            text: style(TEXT, &[]),
            error: style(ALERT, &[Attribute::Bold]),
        }
    }

    /// No escape codes at all.
    pub fn plain() -> Self {
        Theme {
            colored: false,
            title: ContentStyle::new(),
            episode: ContentStyle::new(),
            time: ContentStyle::new(),
            score: ContentStyle::new(),
            no_score: ContentStyle::new(),
            separator: ContentStyle::new(),
            day_header: ContentStyle::new(),
            divider: ContentStyle::new(),
            border: ContentStyle::new(),
            text: ContentStyle::new(),
            error: ContentStyle::new(),
        }
    }

    /// Neon on a terminal, plain when stdout is redirected or `NO_COLOR`
    /// is set.
    pub fn detect() -> Self {
        if std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_tty() {
            Theme::neon()
        } else {
            Theme::plain()
        }
    }

    fn paint(&self, style: &ContentStyle, text: &str) -> String {
        if self.colored {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Status indicator tier picked from a show's average score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Strong,
    Unscored,
    Default,
}

impl Tier {
    pub fn for_score(score: u32) -> Self {
        if score > STRONG_SCORE {
            Tier::Strong
        } else if score == 0 {
            Tier::Unscored
        } else {
            Tier::Default
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Tier::Strong => "🌟",
            Tier::Unscored => "📡",
            Tier::Default => "✨",
        }
    }
}

/// Final text for either outcome of a successful run.
pub fn render_report(report: &Report, theme: &Theme) -> String {
    match report {
        Report::NoEpisodes => render_empty(theme),
        Report::Schedule(schedule) => render_schedule(schedule, theme),
    }
}

pub fn render_empty(theme: &Theme) -> String {
    frame(&[theme.paint(&theme.text, NO_EPISODES)], theme)
}

/// Days newest first, each with a header, a divider and one line per show;
/// a blank line between days.
pub fn render_schedule(schedule: &WeekSchedule, theme: &Theme) -> String {
    let days = schedule.days_newest_first();
    let mut lines = Vec::with_capacity(schedule.show_count() + days.len() * 3);
    for (i, day) in days.iter().enumerate() {
        lines.push(day_header(*day, theme));
        lines.push(theme.paint(&theme.divider, DIVIDER));
        for show in schedule.shows_on(*day) {
            lines.push(show_line(show, theme));
        }
        if i + 1 < days.len() {
            lines.push(String::new());
        }
    }
    frame(&lines, theme)
}

/// One-line error report: `{label}: {cause}`.
pub fn render_error(message: impl Display, theme: &Theme) -> String {
    theme.paint(&theme.error, &message.to_string())
}

pub fn day_header(day: NaiveDate, theme: &Theme) -> String {
    theme.paint(&theme.day_header, &format!("📺 {}", day.format("%A (%b %d)")))
}

pub fn show_line(show: &ShowInfo, theme: &Theme) -> String {
    let marker = Tier::for_score(show.average_score).marker();
    format!(
        "{}{}{}{}{}{}",
        theme.paint(&theme.text, &format!("  {marker} ")),
        theme.paint(&theme.title, &show.title),
        theme.paint(&theme.separator, " • "),
        theme.paint(&theme.episode, &format!("Ep {}", show.episode)),
        theme.paint(
            &theme.time,
            &format!(" 🕒 {}", show.airing_time.format("%-I:%M %p"))
        ),
        score_label(show.average_score, theme),
    )
}

pub fn score_label(score: u32, theme: &Theme) -> String {
    if score > 0 {
        theme.paint(&theme.score, &format!(" ★ {score}/100"))
    } else {
        theme.paint(&theme.no_score, &format!(" ★ {NO_RATING}"))
    }
}

/// Rounded border around `lines`, padded to the widest visible line.
pub fn frame(lines: &[String], theme: &Theme) -> String {
    let width = lines
        .iter()
        .map(|line| measure_text_width(line))
        .max()
        .unwrap_or(0);
    let inner = width + 2 * PAD_X;
    let side = theme.paint(&theme.border, "│");
    let blank = format!("{side}{}{side}", " ".repeat(inner));

    let mut out = Vec::with_capacity(lines.len() + 2 * PAD_Y + 2);
    out.push(theme.paint(&theme.border, &format!("╭{}╮", "─".repeat(inner))));
    out.extend(std::iter::repeat(blank.clone()).take(PAD_Y));
    for line in lines {
        let fill = width - measure_text_width(line) + PAD_X;
        out.push(format!(
            "{side}{}{line}{}{side}",
            " ".repeat(PAD_X),
            " ".repeat(fill)
        ));
    }
    out.extend(std::iter::repeat(blank).take(PAD_Y));
    out.push(theme.paint(&theme.border, &format!("╰{}╯", "─".repeat(inner))));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn show(title: &str, score: u32, at: DateTime<Utc>) -> ShowInfo {
        ShowInfo {
            title: title.into(),
            episode: 12,
            average_score: score,
            airing_time: at,
        }
    }

    fn may(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, minute, 0).unwrap()
    }

    /// Body lines of a plain frame, without border and padding.
    fn body(rendered: &str) -> Vec<String> {
        let lines: Vec<&str> = rendered.lines().collect();
        lines[1 + PAD_Y..lines.len() - 1 - PAD_Y]
            .iter()
            .map(|line| {
                line.trim_start_matches('│')
                    .trim_end_matches('│')
                    .trim()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::for_score(76), Tier::Strong);
        assert_eq!(Tier::for_score(75), Tier::Default);
        assert_eq!(Tier::for_score(40), Tier::Default);
        assert_eq!(Tier::for_score(1), Tier::Default);
        assert_eq!(Tier::for_score(0), Tier::Unscored);
    }

    #[test]
    fn test_show_line_unscored_uses_no_rating_label() {
        let line = show_line(&show("Frieren", 0, may(2, 15, 4)), &Theme::plain());

        assert!(line.contains("📡"));
        assert!(line.contains("No rating"));
        assert!(!line.contains("0/100"));
    }

    #[test]
    fn test_show_line_default_tier_with_score() {
        let line = show_line(&show("Kaiju No. 8", 40, may(2, 15, 4)), &Theme::plain());

        assert_eq!(line, "  ✨ Kaiju No. 8 • Ep 12 🕒 3:04 PM ★ 40/100");
    }

    #[test]
    fn test_show_line_strong_and_boundary_markers() {
        let theme = Theme::plain();

        let strong = show_line(&show("A", 76, may(2, 9, 30)), &theme);
        let boundary = show_line(&show("B", 75, may(2, 9, 30)), &theme);

        assert!(strong.starts_with("  🌟 A"));
        assert!(strong.contains("9:30 AM"));
        assert!(boundary.starts_with("  ✨ B"));
        assert!(boundary.ends_with("★ 75/100"));
    }

    #[test]
    fn test_show_line_marker_uses_body_text_style() {
        // Arrange
        let theme = Theme::neon();

        // Act
        let line = show_line(&show("Oshi no Ko", 82, may(2, 20, 0)), &theme);

        // Assert
        assert!(line.starts_with(&theme.paint(&theme.text, "  🌟 ")));
        assert_eq!(
            measure_text_width(&line),
            measure_text_width(&show_line(&show("Oshi no Ko", 82, may(2, 20, 0)), &Theme::plain()))
        );
    }

    #[test]
    fn test_day_header_format() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();

        assert_eq!(day_header(day, &Theme::plain()), "📺 Monday (May 06)");
    }

    #[test]
    fn test_render_schedule_days_descending() {
        // Arrange
        let schedule: WeekSchedule = vec![
            show("First", 50, may(1, 10, 0)),
            show("Third", 50, may(3, 10, 0)),
            show("Second", 50, may(2, 10, 0)),
        ]
        .into_iter()
        .collect();

        // Act
        let lines = body(&render_schedule(&schedule, &Theme::plain()));

        // Assert
        let headers: Vec<&String> = lines.iter().filter(|l| l.starts_with("📺")).collect();
        assert_eq!(
            headers,
            vec![
                "📺 Friday (May 03)",
                "📺 Thursday (May 02)",
                "📺 Wednesday (May 01)"
            ]
        );
    }

    #[test]
    fn test_render_schedule_keeps_within_day_order() {
        let schedule: WeekSchedule = vec![
            show("Late", 50, may(2, 22, 0)),
            show("Noon", 50, may(2, 12, 0)),
            show("Early", 50, may(2, 1, 0)),
        ]
        .into_iter()
        .collect();

        let lines = body(&render_schedule(&schedule, &Theme::plain()));

        let titles: Vec<&str> = lines
            .iter()
            .filter(|l| l.contains(" • Ep "))
            .map(|l| l.split(' ').nth(1).unwrap())
            .collect();
        assert_eq!(titles, vec!["Late", "Noon", "Early"]);
    }

    #[test]
    fn test_render_schedule_blank_line_between_days_only() {
        let schedule: WeekSchedule = vec![show("X", 80, may(3, 10, 0)), show("Y", 0, may(1, 10, 0))]
            .into_iter()
            .collect();

        let lines = body(&render_schedule(&schedule, &Theme::plain()));

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[2..=4].iter().filter(|l| l.is_empty()).count(), 1);
        assert!(lines[3].is_empty());
        assert!(!lines.last().unwrap().is_empty());
        assert_eq!(lines[1], DIVIDER);
    }

    #[test]
    fn test_frame_lines_share_width() {
        let theme = Theme::neon();
        let lines = vec![
            theme.paint(&theme.title, "short"),
            String::from("a considerably longer line 🌟"),
        ];

        let framed = frame(&lines, &theme);

        let widths: Vec<usize> = framed.lines().map(measure_text_width).collect();
        assert_eq!(widths.len(), lines.len() + 2 * PAD_Y + 2);
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn test_render_empty_has_message_only() {
        let rendered = render_report(&Report::NoEpisodes, &Theme::plain());

        assert_eq!(body(&rendered), vec![NO_EPISODES]);
        assert!(!rendered.contains("📺"));
    }

    #[test]
    fn test_plain_theme_emits_no_escape_codes() {
        let schedule: WeekSchedule = vec![show("Plain", 90, may(4, 18, 45))].into_iter().collect();

        let rendered = render_schedule(&schedule, &Theme::plain());

        assert!(!rendered.contains('\u{1b}'));
        assert!(Theme::neon()
            .paint(&Theme::neon().title, "x")
            .contains('\u{1b}'));
    }

    #[test]
    fn test_render_error_is_single_line() {
        let rendered = render_error("Error making request: connection refused", &Theme::plain());

        assert_eq!(rendered, "Error making request: connection refused");
    }
}
