use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::records::{Match, Team};

pub const MATCHES_FILE: &str = "matches.json";
pub const TEAMS_FILE: &str = "teams.json";

/// Debug snapshots of the raw extraction and the grouped view. Nothing
/// downstream reads them back.
pub fn write_snapshots(
    dir: &Path,
    matches: &[Match],
    teams: &[Team],
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("create snapshot dir {}", dir.display()))?;
    let matches_path = dir.join(MATCHES_FILE);
    write_json(&matches_path, matches)?;
    let teams_path = dir.join(TEAMS_FILE);
    write_json(&teams_path, teams)?;
    Ok((matches_path, teams_path))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)
        .with_context(|| format!("serialize {}", path.display()))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}
