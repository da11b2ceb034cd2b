use std::process::ExitCode;

use anyhow::Result;

use scorecard_scraper::config::Config;
use scorecard_scraper::pipeline;

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Failures are reported once, through the logger.
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::from_args(std::env::args())?;
    let summary = pipeline::run(&config)?;

    println!(
        "Done: {} matches, {} sheets, {} scorecards",
        summary.matches, summary.workbook.sheets, summary.scorecards.written
    );
    Ok(())
}
