mod common;

use std::fs;

use serde_json::Value;

use scorecard_scraper::config::Config;
use scorecard_scraper::persist::{MATCHES_FILE, TEAMS_FILE};
use scorecard_scraper::pipeline::{process_markup, run};

use common::{read_fixture, write_template};

fn config_in(dir: &std::path::Path) -> Config {
    Config {
        source: "http://localhost/unused".to_string(),
        excel: dir.join("WorldCup.xlsx"),
        data_folder: dir.join("data"),
        template: dir.join("Template.pdf"),
        snapshot_dir: dir.join("snapshots"),
        render_parallelism: 2,
    }
}

#[test]
fn results_page_produces_every_artifact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(dir.path());
    write_template(&config.template);

    let summary = process_markup(&read_fixture("match_results.html"), &config)
        .expect("pipeline should succeed");
    assert_eq!(summary.matches, 4);
    assert_eq!(summary.workbook.sheets, 6);
    assert_eq!(summary.workbook.rows, 8);
    assert_eq!(summary.scorecards.written, 8);

    let matches: Value = serde_json::from_str(
        &fs::read_to_string(config.snapshot_dir.join(MATCHES_FILE)).expect("matches snapshot"),
    )
    .expect("matches json");
    assert_eq!(matches[0]["team1"], "New Zealand");
    assert_eq!(matches[0]["team1Score"], "241/8");
    assert_eq!(matches[2]["team2Score"], "");

    let teams: Value = serde_json::from_str(
        &fs::read_to_string(config.snapshot_dir.join(TEAMS_FILE)).expect("teams snapshot"),
    )
    .expect("teams json");
    assert_eq!(teams[1]["name"], "England");
    assert_eq!(teams[1]["matches"][1]["vs"], "Australia");
    assert_eq!(teams[1]["matches"][1]["selfScore"], "226/2");
    assert_eq!(teams[1]["matches"][1]["opponentScore"], "223");

    assert!(config.excel.is_file());
    assert!(config
        .data_folder
        .join("New Zealand")
        .join("India.pdf")
        .is_file());
    assert!(config
        .data_folder
        .join("Pakistan")
        .join("Sri Lanka.pdf")
        .is_file());
}

#[test]
fn unreachable_source_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config_in(dir.path());
    config.source = "http://127.0.0.1:1/".to_string();
    write_template(&config.template);

    assert!(run(&config).is_err());
    assert!(!config.excel.exists());
    assert!(!config.data_folder.exists());
    assert!(!config.snapshot_dir.join(MATCHES_FILE).exists());
    assert!(!config.snapshot_dir.join(TEAMS_FILE).exists());
}

#[test]
fn broken_layout_stops_before_exports() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(dir.path());
    write_template(&config.template);

    let html = r#"<div class="match-score-block">
        <div class="name-detail"><p class="name">Only One</p></div>
    </div>"#;
    assert!(process_markup(html, &config).is_err());
    assert!(!config.excel.exists());
    assert!(!config.data_folder.exists());
}
