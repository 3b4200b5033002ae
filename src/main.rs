// Entrypoint for the CLI application.
// - Keeps `main` small: build the API client, run the pipeline once and
//   print whichever outcome it produced.
// - Any failure prints one error line and exits non-zero.

use std::process::ExitCode;
use std::time::Duration;

use airing_digest::{api::ApiClient, pipeline, ui};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let theme = ui::Theme::detect();

    // Endpoint and timeout come from `AIRING_API_URL` / `AIRING_TIMEOUT_SECS`.
    let api = match ApiClient::from_env() {
        Ok(api) => api,
        Err(e) => {
            println!("{}", ui::render_error(format!("{e:#}"), &theme));
            return ExitCode::FAILURE;
        }
    };

    // indicatif's spinner draws to stderr and hides itself off-terminal.
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Fetching this week's episodes...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = pipeline::run(&api, Utc::now());
    spinner.finish_and_clear();

    match outcome {
        Ok(report) => {
            println!("{}", ui::render_report(&report, &theme));
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = ?err, "run failed");
            println!("{}", ui::render_error(&err, &theme));
            ExitCode::FAILURE
        }
    }
}
