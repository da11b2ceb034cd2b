use std::env;
use std::path::PathBuf;

use crate::error::ScrapeError;
use crate::scorecard::TEMPLATE_FILE;

const DEFAULT_RENDER_PARALLELISM: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Page listing the fixture results.
    pub source: String,
    /// Spreadsheet output path.
    pub excel: PathBuf,
    /// Root of the per-team scorecard tree.
    pub data_folder: PathBuf,
    pub template: PathBuf,
    pub snapshot_dir: PathBuf,
    pub render_parallelism: usize,
}

impl Config {
    /// Reads `--flag=value` / `--flag value` pairs. The first item is taken to
    /// be the program name, as with `std::env::args()`.
    ///
    /// Optional settings fall back to `SCORECARD_TEMPLATE`, `SNAPSHOT_DIR` and
    /// `RENDER_PARALLELISM` before their defaults.
    pub fn from_args<I, S>(args: I) -> Result<Self, ScrapeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().skip(1).map(Into::into).collect::<Vec<String>>();

        let source = required(&args, "source")?;
        let excel = required(&args, "excel")?;
        let data_folder = required(&args, "dataFolder")?;

        let template = flag_value(&args, "template")
            .or_else(|| env_value("SCORECARD_TEMPLATE"))
            .unwrap_or_else(|| TEMPLATE_FILE.to_string());
        let snapshot_dir = flag_value(&args, "snapshots")
            .or_else(|| env_value("SNAPSHOT_DIR"))
            .unwrap_or_else(|| ".".to_string());
        let render_parallelism = env_value("RENDER_PARALLELISM")
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_RENDER_PARALLELISM)
            .clamp(1, 32);

        Ok(Self {
            source,
            excel: PathBuf::from(excel),
            data_folder: PathBuf::from(data_folder),
            template: PathBuf::from(template),
            snapshot_dir: PathBuf::from(snapshot_dir),
            render_parallelism,
        })
    }
}

fn required(args: &[String], name: &str) -> Result<String, ScrapeError> {
    flag_value(args, name).ok_or_else(|| ScrapeError::Config(format!("missing --{name}=<value>")))
}

fn flag_value(args: &[String], name: &str) -> Option<String> {
    let long = format!("--{name}");
    let prefix = format!("{long}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if *arg == long {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            let trimmed = next.trim();
            if !trimmed.is_empty() && !trimmed.starts_with("--") {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.trim().is_empty())
}
