//! Create Product Service - the submit workflow of the product form.
//!
//! 1. Validate the raw draft against the rule table
//! 2. On success, hand the normalized product to the sink
//! 3. Return a fresh blank draft, the state the form resets to
//!
//! A rejected draft never reaches the sink and never consumes ids.

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::ports::{IdGenerator, ProductSink},
    domain::{
        ColorVariantInput, DomainError, ErrorKind, FieldErrors, FieldRules, Limits, ProductDraft,
        ProductDraftInput, ProductRules, ProductValidator, ValueType, rules::REQUIRED_MESSAGE,
    },
    error::{CatalogError, CatalogResult},
};

/// One row of the rule table, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleInfo {
    /// Field path, `colors.` prefixed for variant fields.
    pub field: String,
    pub value_type: ValueType,
    pub kind: ErrorKind,
    pub code: String,
    /// Short description of what the rule checks.
    pub constraint: String,
    pub message: String,
}

impl RuleInfo {
    /// Every rule of the table in form order, product fields first.
    pub fn table(rules: &ProductRules) -> Vec<RuleInfo> {
        let product = rules.product_fields().into_iter().map(|f| ("", f));
        let colors = rules.color_fields().into_iter().map(|f| ("colors.", f));
        product
            .chain(colors)
            .flat_map(|(prefix, field)| describe(prefix, field))
            .collect()
    }

    /// Rules of one field, addressed as `name`, `colors.price` or `colors.0.price`.
    pub fn for_field(rules: &ProductRules, path: &str) -> CatalogResult<Vec<RuleInfo>> {
        let field = rules.lookup(path).map_err(CatalogError::Domain)?;
        let prefix = if path.starts_with("colors.") {
            "colors."
        } else {
            ""
        };
        Ok(describe(prefix, field))
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The product was accepted and delivered to the sink.
    Accepted {
        product: ProductDraft,
        /// Blank draft to continue with.
        next_draft: ProductDraftInput,
    },
    /// Validation failed; the draft is handed back unchanged.
    Rejected {
        errors: FieldErrors,
        draft: ProductDraftInput,
    },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Accepted product, or the field errors as a [`CatalogError`].
    pub fn into_result(self) -> CatalogResult<ProductDraft> {
        match self {
            Self::Accepted { product, .. } => Ok(product),
            Self::Rejected { errors, .. } => Err(DomainError::Rejected(errors).into()),
        }
    }
}

/// Product creation workflow.
pub struct CreateProductService {
    ids: Box<dyn IdGenerator>,
    sink: Box<dyn ProductSink>,
    validator: ProductValidator,
}

impl CreateProductService {
    /// Create a service with the default ruleset.
    pub fn new(ids: Box<dyn IdGenerator>, sink: Box<dyn ProductSink>) -> Self {
        Self {
            ids,
            sink,
            validator: ProductValidator::default(),
        }
    }

    /// Use a ruleset with different limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.validator = ProductValidator::with_limits(limits);
        self
    }

    pub fn validator(&self) -> &ProductValidator {
        &self.validator
    }

    /// Validate and, if valid, deliver the product to the sink.
    ///
    /// Rejection is a normal outcome, not an error; only sink failures are
    /// returned as `Err`.
    #[instrument(skip_all, fields(colors = input.color_count()))]
    pub fn submit(&self, input: ProductDraftInput) -> CatalogResult<SubmitOutcome> {
        let product = match self.validator.validate(&input, self.ids.as_ref()) {
            Ok(product) => product,
            Err(errors) => {
                warn!(%errors, "Draft rejected");
                return Ok(SubmitOutcome::Rejected {
                    errors,
                    draft: input,
                });
            }
        };

        self.sink.accept(&product)?;
        info!(id = %product.id, name = %product.name, "Product accepted");

        Ok(SubmitOutcome::Accepted {
            product,
            next_draft: self.blank_draft(),
        })
    }

    /// Validate without submitting.
    pub fn check(&self, input: &ProductDraftInput) -> Result<(), FieldErrors> {
        self.validator.check(input)
    }

    /// The form's initial state, with a fresh id.
    pub fn blank_draft(&self) -> ProductDraftInput {
        ProductDraftInput::blank(self.ids.generate())
    }

    /// The variant appended by "Add Color", with a fresh id.
    pub fn blank_color(&self) -> ColorVariantInput {
        ColorVariantInput::blank(self.ids.generate())
    }

    /// Every rule in form order, product fields first.
    pub fn rules(&self) -> Vec<RuleInfo> {
        RuleInfo::table(self.validator.rules())
    }

    /// Rules of one field, addressed as `name`, `colors.price` or `colors.0.price`.
    pub fn rules_for(&self, path: &str) -> CatalogResult<Vec<RuleInfo>> {
        RuleInfo::for_field(self.validator.rules(), path)
    }
}

fn describe(prefix: &str, field: &FieldRules) -> Vec<RuleInfo> {
    let name = format!("{prefix}{}", field.field());
    let value_type = field.value_type();

    let mut rows = vec![
        RuleInfo {
            field: name.clone(),
            value_type,
            kind: ErrorKind::RequiredMissing,
            code: "required".into(),
            constraint: "present".into(),
            message: REQUIRED_MESSAGE.into(),
        },
        RuleInfo {
            field: name.clone(),
            value_type,
            kind: ErrorKind::TypeMismatch,
            code: "type".into(),
            constraint: value_type.as_str().into(),
            message: field.type_message().into(),
        },
    ];
    rows.extend(field.rules().iter().map(|rule| RuleInfo {
        field: name.clone(),
        value_type,
        kind: rule.kind(),
        code: rule.code().into(),
        constraint: rule.predicate().describe(),
        message: rule.message().into(),
    }));
    rows
}
