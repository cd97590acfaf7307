//! Command handlers, one module per subcommand.

use std::path::PathBuf;

use catalog_adapters::DraftLoader;
use catalog_core::{
    application::LoadedDraft,
    domain::{FieldErrors, Limits},
};
use serde::Serialize;
use tracing::debug;

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub mod completions;
pub mod config;
pub mod init;
pub mod rules;
pub mod submit;
pub mod validate;

/// Validation result of one loaded draft.
#[derive(Debug, Clone, Serialize)]
pub struct DraftReport {
    /// File (and `#N` record) the draft came from.
    pub origin: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}

impl DraftReport {
    pub fn new(origin: String, result: Result<(), FieldErrors>) -> Self {
        let errors = result.err().unwrap_or_default();
        Self {
            origin,
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Ruleset limits for one run; `--max-quantity` wins over the config.
pub(crate) fn run_limits(config: &AppConfig, max_quantity: Option<u32>) -> CliResult<Limits> {
    let limits = config.limits(max_quantity);
    if limits.max_quantity == 0 {
        return Err(CliError::InvalidInput {
            message: "max quantity must be at least 1".into(),
            source: None,
        });
    }
    Ok(limits)
}

/// Load every draft under `paths`; an empty result is an error.
pub(crate) fn load_drafts(paths: Vec<PathBuf>) -> CliResult<Vec<LoadedDraft>> {
    let drafts = DraftLoader::new().load_all(paths.as_slice())?;
    debug!(count = drafts.len(), "drafts loaded");
    if drafts.is_empty() {
        return Err(CliError::NoDrafts { paths });
    }
    Ok(drafts)
}

/// `✓ origin` or `✗ origin` followed by its field errors.
pub(crate) fn print_report(output: &OutputManager, report: &DraftReport) -> CliResult<()> {
    if report.valid {
        output.success(&report.origin)?;
    } else {
        output.error(&report.origin)?;
        output.field_errors(&report.errors)?;
    }
    Ok(())
}

/// `Ok` when nothing was rejected, otherwise the tally as an error.
pub(crate) fn rejection_tally(reports: &[DraftReport]) -> CliResult<()> {
    let rejected = reports.iter().filter(|r| !r.valid).count();
    if rejected == 0 {
        return Ok(());
    }
    Err(CliError::DraftsRejected {
        rejected,
        total: reports.len(),
    })
}
