//! `catalog submit` - validate drafts and submit the valid ones.

use catalog_adapters::{
    AcceptedProduct, FanOutSink, LoggingSink, MemorySink, RandomIdGenerator, SequentialIdGenerator,
};
use catalog_core::{
    application::{CreateProductService, IdGenerator, LoadedDraft, SubmitOutcome},
    domain::ProductDraft,
};
use chrono::Local;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    cli::{OutputFormat, SubmitArgs},
    commands::{DraftReport, load_drafts, print_report, rejection_tally, run_limits},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Machine-readable result of a submit run.
#[derive(Debug, Serialize)]
struct SubmitSummary<'a> {
    accepted: &'a [AcceptedProduct],
    rejected: Vec<&'a DraftReport>,
}

/// Submit every valid draft under the given paths.
///
/// Valid drafts are submitted even when others are rejected; the exit code
/// still reports the rejections.
pub fn execute(args: SubmitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let limits = run_limits(&config, args.max_quantity)?;
    let drafts = load_drafts(args.paths)?;

    let ids: Box<dyn IdGenerator> = match args.seed {
        Some(seed) => Box::new(SequentialIdGenerator::new(seed)),
        None => Box::new(RandomIdGenerator::new()),
    };
    let accepted = MemorySink::new();
    let sink = FanOutSink::new()
        .with(LoggingSink::new())
        .with(accepted.clone());
    let service = CreateProductService::new(ids, Box::new(sink)).with_limits(limits);

    let (reports, products) = submit_all(&service, drafts)?;
    let stored = accepted.list()?;

    if args.json || output.format() == OutputFormat::Json {
        output.json(&SubmitSummary {
            accepted: &stored,
            rejected: reports.iter().filter(|r| !r.valid).collect(),
        })?;
    } else {
        let mut products = products.iter();
        for report in &reports {
            print_report(&output, report)?;
            if !report.valid {
                continue;
            }
            if let Some(product) = products.next() {
                output.print(&format!(
                    "    {} ({}) as {}",
                    product.name, product.price, product.id
                ))?;
            }
        }
        if !stored.is_empty() {
            output.info(&format!(
                "Submitted {} of {} drafts at {}",
                stored.len(),
                reports.len(),
                Local::now().format("%Y-%m-%d %H:%M:%S"),
            ))?;
        }
    }

    rejection_tally(&reports)
}

/// Submit drafts in order, returning a report per draft and the accepted
/// products. Sink failures abort the run.
#[instrument(skip_all, fields(drafts = drafts.len()))]
fn submit_all(
    service: &CreateProductService,
    drafts: Vec<LoadedDraft>,
) -> CliResult<(Vec<DraftReport>, Vec<ProductDraft>)> {
    let mut reports = Vec::with_capacity(drafts.len());
    let mut products = Vec::new();

    for LoadedDraft { origin, input } in drafts {
        match service.submit(input)? {
            SubmitOutcome::Accepted { product, .. } => {
                reports.push(DraftReport::new(origin, Ok(())));
                products.push(product);
            }
            SubmitOutcome::Rejected { errors, .. } => {
                reports.push(DraftReport::new(origin, Err(errors)));
            }
        }
    }

    info!(accepted = products.len(), total = reports.len(), "submit finished");
    Ok((reports, products))
}

#[cfg(test)]
mod tests {
    use catalog_core::{
        application::{ApplicationError, ProductSink},
        domain::ProductDraftInput,
        error::CatalogResult,
    };
    use mockall::mock;
    use serde_json::json;

    use super::*;
    use crate::error::CliError;

    mock! {
        Sink {}
        impl ProductSink for Sink {
            fn accept(&self, product: &ProductDraft) -> CatalogResult<()>;
        }
    }

    fn draft(origin: &str, name: &str) -> LoadedDraft {
        let input: ProductDraftInput = serde_json::from_value(json!({
            "pId": "b12fcc08-b480-46da-9373-10a91a045627",
            "name": name,
            "description": "Adjustable brass desk lamp with linen shade",
            "price": 49.95,
            "imageURL": "lamp.jpeg",
            "quantity": 40
        }))
        .unwrap();
        LoadedDraft {
            origin: origin.into(),
            input,
        }
    }

    fn service(sink: MockSink) -> CreateProductService {
        CreateProductService::new(Box::new(SequentialIdGenerator::new(7)), Box::new(sink))
    }

    #[test]
    fn rejected_drafts_never_reach_the_sink() {
        let mut sink = MockSink::new();
        sink.expect_accept()
            .withf(|p| p.name == "Desk Lamp - Brass")
            .times(1)
            .returning(|_| Ok(()));

        let drafts = vec![draft("a.json", "Desk Lamp - Brass"), draft("b.json", "")];
        let (reports, products) = submit_all(&service(sink), drafts).unwrap();

        assert_eq!(products.len(), 1);
        assert!(reports[0].valid);
        assert!(!reports[1].valid);
        assert!(reports[1].errors.contains("name"));
    }

    #[test]
    fn sink_failure_aborts_the_run() {
        let mut sink = MockSink::new();
        sink.expect_accept().times(1).returning(|_| {
            Err(ApplicationError::SinkRejected {
                reason: "catalog closed".into(),
            }
            .into())
        });

        let drafts = vec![
            draft("a.json", "Desk Lamp - Brass"),
            draft("b.json", "Desk Lamp - Chrome"),
        ];
        let err = submit_all(&service(sink), drafts).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
