use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid invocation: {0}")]
    Config(String),

    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("http {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("match block {block}: missing {missing}")]
    Structure { block: usize, missing: &'static str },

    #[error("cannot read scorecard template {}", path.display())]
    TemplateMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unusable scorecard template: {0}")]
    Template(String),

    #[error("file system error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed rendering scorecard {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },
}

impl ScrapeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScrapeError::Io {
            path: path.into(),
            source,
        }
    }
}
