//! Pipeline list parsing
//!
//! Reads the CSV pipeline list. The first row is a header; every following row
//! holds, in order: app name, project id, access token, branch, variables.
//!
//! A bad header aborts the whole parse. A bad row is reported as a
//! [`RowOutcome::Skipped`] and parsing carries on with the next one. Empty
//! lines are not rows at all and are passed over without a warning.

use flowforge_core::domain::request::{PipelineRequest, RequestError};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Columns every row (and the header) must have
pub const EXPECTED_COLUMN_COUNT: usize = 5;

const APP_NAME_INDEX: usize = 0;
const PROJECT_ID_INDEX: usize = 1;
const ACCESS_TOKEN_INDEX: usize = 2;
const BRANCH_INDEX: usize = 3;
const VARIABLES_INDEX: usize = 4;

/// Errors that make the whole pipeline list unusable
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV file header is missing")]
    MissingHeader,

    #[error("CSV file header has {found} column(s), expected at least {}", EXPECTED_COLUMN_COUNT)]
    ShortHeader { found: usize },
}

/// Why a row was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Row is shorter than [`EXPECTED_COLUMN_COUNT`]
    TooFewColumns { found: usize },
    /// Row has the right shape but failed validation
    Invalid(RequestError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewColumns { found } => write!(
                f,
                "has {} column(s), expected {}",
                found, EXPECTED_COLUMN_COUNT
            ),
            Self::Invalid(err) => write!(f, "{}", err),
        }
    }
}

/// Result of reading one data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted(PipelineRequest),
    Skipped {
        /// 1-based line number, the header being line 1
        line: u64,
        reason: SkipReason,
    },
}

/// Parses every data row of a CSV source
///
/// Outcomes are returned in input order, accepted and skipped alike.
pub fn parse_rows<R: io::Read>(source: R) -> Result<Vec<RowOutcome>, ManifestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut records = reader.records();

    let header = records.next().ok_or(ManifestError::MissingHeader)??;
    if header.len() < EXPECTED_COLUMN_COUNT {
        return Err(ManifestError::ShortHeader {
            found: header.len(),
        });
    }

    let mut outcomes = Vec::new();

    for (index, record) in records.enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(index as u64 + 2);

        if record.len() < EXPECTED_COLUMN_COUNT {
            outcomes.push(RowOutcome::Skipped {
                line,
                reason: SkipReason::TooFewColumns {
                    found: record.len(),
                },
            });
            continue;
        }

        let field = |i: usize| record.get(i).unwrap_or_default();
        let outcome = match PipelineRequest::new(
            field(APP_NAME_INDEX),
            field(PROJECT_ID_INDEX),
            field(ACCESS_TOKEN_INDEX),
            field(BRANCH_INDEX),
            field(VARIABLES_INDEX),
        ) {
            Ok(request) => RowOutcome::Accepted(request),
            Err(err) => RowOutcome::Skipped {
                line,
                reason: SkipReason::Invalid(err),
            },
        };
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Reads the pipeline list at `path`, logging and dropping invalid rows
pub fn load_requests(path: &Path) -> Result<Vec<PipelineRequest>, ManifestError> {
    info!("Starting to parse CSV file: {}", path.display());

    let file = File::open(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut requests = Vec::new();
    for outcome in parse_rows(file)? {
        match outcome {
            RowOutcome::Accepted(request) => {
                debug!("Added pipeline config for app: {}", request.app_name());
                requests.push(request);
            }
            RowOutcome::Skipped { line, reason } => {
                warn!("Skipping line {}: {}", line, reason);
            }
        }
    }

    info!(
        "CSV parsing completed. Found {} valid pipeline configuration(s)",
        requests.len()
    );
    Ok(requests)
}
