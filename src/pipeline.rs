use anyhow::{Context, Result};

use crate::config::Config;
use crate::extract::extract_matches;
use crate::http_client::{fetch_page, http_client};
use crate::persist::write_snapshots;
use crate::scorecard::{export_scorecards, ScorecardReport};
use crate::teams::aggregate;
use crate::workbook_export::{export_workbook, ExportReport};

pub struct RunSummary {
    pub matches: usize,
    pub workbook: ExportReport,
    pub scorecards: ScorecardReport,
}

/// Full run: download the page, then everything in [`process_markup`].
/// Nothing is written when the download fails.
pub fn run(config: &Config) -> Result<RunSummary> {
    let client = http_client()?;
    log::info!("fetching {}", config.source);
    let html = fetch_page(client, &config.source)?;
    process_markup(&html, config)
}

/// Extract, group and export an already downloaded results page.
pub fn process_markup(html: &str, config: &Config) -> Result<RunSummary> {
    let matches =
        extract_matches(html).context("results page did not have the expected layout")?;
    log::info!("extracted {} matches", matches.len());

    let teams = aggregate(&matches);
    log::info!("grouped into {} teams", teams.len());

    let (matches_path, teams_path) = write_snapshots(&config.snapshot_dir, &matches, &teams)?;
    log::debug!(
        "snapshots at {} and {}",
        matches_path.display(),
        teams_path.display()
    );

    let workbook = export_workbook(&teams, &config.excel)?;
    log::info!(
        "workbook {}: {} sheets, {} rows",
        config.excel.display(),
        workbook.sheets,
        workbook.rows
    );

    let scorecards = export_scorecards(
        &teams,
        &config.data_folder,
        &config.template,
        config.render_parallelism,
    )
    .context("scorecard export failed")?;
    log::info!(
        "scorecards under {}: {} files for {} teams",
        config.data_folder.display(),
        scorecards.written,
        scorecards.teams
    );

    Ok(RunSummary {
        matches: matches.len(),
        workbook,
        scorecards,
    })
}
