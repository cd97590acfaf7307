//! `catalog validate` - check drafts without submitting them.

use catalog_core::domain::ProductValidator;
use tracing::info;

use crate::{
    cli::{OutputFormat, ValidateArgs},
    commands::{DraftReport, load_drafts, print_report, rejection_tally, run_limits},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Validate every draft under the given paths and report per draft.
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let limits = run_limits(&config, args.max_quantity)?;
    let validator = ProductValidator::with_limits(limits);
    let drafts = load_drafts(args.paths)?;

    let reports: Vec<DraftReport> = drafts
        .into_iter()
        .map(|draft| DraftReport::new(draft.origin, validator.check(&draft.input)))
        .collect();
    info!(
        drafts = reports.len(),
        max_quantity = limits.max_quantity,
        "validation finished"
    );

    if output.format() == OutputFormat::Json {
        output.json(&reports)?;
    } else {
        for report in &reports {
            print_report(&output, report)?;
        }
        let valid = reports.iter().filter(|r| r.valid).count();
        if valid == reports.len() {
            output.success(&format!("All {valid} drafts are valid"))?;
        }
    }

    rejection_tally(&reports)
}
