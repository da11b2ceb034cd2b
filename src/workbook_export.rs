use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::records::{Team, TeamMatchEntry};

pub const HEADER: [&str; 4] = ["vs", "Self Score", "Opponent Score", "result"];

pub struct ExportReport {
    pub sheets: usize,
    pub rows: usize,
}

/// Writes one sheet per team. Sheet names are the team names as scraped, so
/// a name the format rejects (too long, `[]:*?/\`, duplicate) fails the export.
pub fn export_workbook(teams: &[Team], path: &Path) -> Result<ExportReport> {
    let mut workbook = Workbook::new();
    let mut rows = 0usize;

    for team in teams {
        let team_rows = team_rows(team);
        rows = rows.saturating_add(team_rows.len().saturating_sub(1));

        let sheet = workbook.add_worksheet();
        sheet
            .set_name(&team.name)
            .with_context(|| format!("invalid sheet name {:?}", team.name))?;
        write_rows(sheet, &team_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        sheets: teams.len(),
        rows,
    })
}

/// Header plus one row per fixture, every cell as text.
pub fn team_rows(team: &Team) -> Vec<Vec<String>> {
    let mut rows = vec![HEADER.iter().map(|h| h.to_string()).collect()];
    rows.extend(team.matches.iter().map(entry_row));
    rows
}

fn entry_row(entry: &TeamMatchEntry) -> Vec<String> {
    vec![
        entry.opponent.clone(),
        entry.self_score.clone(),
        entry.opponent_score.clone(),
        entry.result.clone(),
    ]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
