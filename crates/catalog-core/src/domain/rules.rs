//! The product ruleset as data.
//!
//! # Design
//!
//! Each field owns a [`FieldRules`]: the value type it must coerce to and an
//! ordered list of [`Rule`]s. A rule is plain data (kind, code, message,
//! predicate), so the whole table can be listed, filtered and tested without
//! running a form. [`FieldRules::check`] is the engine: presence, coercion,
//! then the first rule whose predicate fails.
//!
//! # Adding a rule
//!
//! 1. Add a [`Predicate`] variant if no existing one fits
//! 2. Attach it to the field in [`ProductRules::new`] with `.with(...)`
//! 3. Evaluation order follows [`ErrorKind::stage`], not insertion order

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    error::{DomainError, ErrorKind},
    field::FieldError,
};

/// Inclusive upper bound for any price.
pub const MAX_PRICE: f64 = 10_000.0;

/// Inclusive upper bound for quantities unless overridden by [`Limits`].
pub const DEFAULT_MAX_QUANTITY: u32 = 10_000;

/// Message for absent or null fields.
pub const REQUIRED_MESSAGE: &str = "Required";

/// Allowed float error per unit of magnitude when checking whole cents.
const CENT_ULPS: f64 = 4.0 * f64::EPSILON;

static PRODUCT_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TextPattern::ProductText.source()).expect("valid text pattern"));

static IMAGE_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TextPattern::ImageFile.source()).expect("valid image pattern"));

// ── Limits ────────────────────────────────────────────────────────────────────

/// Tunable bounds of the ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Inclusive maximum for `quantity` fields.
    pub max_quantity: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_quantity: DEFAULT_MAX_QUANTITY,
        }
    }
}

// ── Values ────────────────────────────────────────────────────────────────────

/// The type a raw value must coerce to before any rule runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Text,
    Number,
}

impl ValueType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
        }
    }
}

/// A raw value after successful coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Checked {
    Text(String),
    Number(f64),
}

impl Checked {
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

// ── Predicates ────────────────────────────────────────────────────────────────

/// Named regular expressions used by the ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPattern {
    /// Letters, digits, space, hyphen, underscore and colon.
    ProductText,
    /// Ends in a common raster image extension, any case.
    ImageFile,
}

impl TextPattern {
    pub const fn source(&self) -> &'static str {
        match self {
            Self::ProductText => r"^[A-Za-z0-9 _:\-]+$",
            Self::ImageFile => r"(?i)\.(gif|jpe?g|tiff?|png|bmp)$",
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            Self::ProductText => &PRODUCT_TEXT,
            Self::ImageFile => &IMAGE_FILE,
        }
    }
}

/// The condition a rule asserts about a coerced value.
///
/// A predicate that does not apply to the value's type holds vacuously; the
/// coercion step already guarantees each field sees only its own type.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    WholeNumber,
    Pattern(TextPattern),
    Uuid,
    CentMultiple,
}

impl Predicate {
    pub fn holds(&self, value: &Checked) -> bool {
        match (self, value) {
            (Self::MinLength(min), Checked::Text(s)) => s.chars().count() >= *min,
            (Self::MaxLength(max), Checked::Text(s)) => s.chars().count() <= *max,
            (Self::Pattern(pattern), Checked::Text(s)) => pattern.regex().is_match(s),
            (Self::Uuid, Checked::Text(s)) => is_hyphenated_uuid(s),
            (Self::Min(min), Checked::Number(n)) => n >= min,
            (Self::Max(max), Checked::Number(n)) => n <= max,
            (Self::WholeNumber, Checked::Number(n)) => n.fract() == 0.0,
            (Self::CentMultiple, Checked::Number(n)) => is_cent_multiple(*n),
            _ => true,
        }
    }

    /// Short human description of the constraint, for rule listings.
    pub fn describe(&self) -> String {
        match self {
            Self::MinLength(n) => format!("length >= {n}"),
            Self::MaxLength(n) => format!("length <= {n}"),
            Self::Min(n) => format!(">= {n}"),
            Self::Max(n) => format!("<= {n}"),
            Self::WholeNumber => "whole number".into(),
            Self::Pattern(p) => format!("matches {}", p.source()),
            Self::Uuid => "hyphenated UUID".into(),
            Self::CentMultiple => "multiple of 0.01".into(),
        }
    }
}

/// 36 characters in 8-4-4-4-12 hex groups.
fn is_hyphenated_uuid(s: &str) -> bool {
    s.len() == 36 && Uuid::try_parse(s).is_ok()
}

/// Compare the amount in cents with its rounding instead of taking a float
/// modulo, which rejects values like 19.99.
///
/// The tolerance scales with the amount so it only absorbs representation
/// error; any real fraction of a cent fails.
fn is_cent_multiple(value: f64) -> bool {
    let cents = value * 100.0;
    (cents - cents.round()).abs() <= cents.abs().max(1.0) * CENT_ULPS
}

// ── Rules ─────────────────────────────────────────────────────────────────────

/// One entry of the rule table.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    kind: ErrorKind,
    code: &'static str,
    message: Cow<'static, str>,
    predicate: Predicate,
}

impl Rule {
    pub fn new(
        kind: ErrorKind,
        code: &'static str,
        message: impl Into<Cow<'static, str>>,
        predicate: Predicate,
    ) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            predicate,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    fn error(&self) -> FieldError {
        FieldError::new(self.kind, self.code, self.message.clone())
    }
}

/// All rules for one field plus its presence and type checks.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
    field: &'static str,
    value_type: ValueType,
    type_message: &'static str,
    rules: Vec<Rule>,
}

impl FieldRules {
    pub fn text(field: &'static str, type_message: &'static str) -> Self {
        Self {
            field,
            value_type: ValueType::Text,
            type_message,
            rules: Vec::new(),
        }
    }

    pub fn number(field: &'static str, type_message: &'static str) -> Self {
        Self {
            field,
            value_type: ValueType::Number,
            type_message,
            rules: Vec::new(),
        }
    }

    /// Add a rule, keeping the list ordered by [`ErrorKind::stage`].
    ///
    /// Rules of the same stage keep their insertion order.
    pub fn with(mut self, rule: Rule) -> Self {
        let stage = rule.kind.stage();
        let at = self.rules.partition_point(|r| r.kind.stage() <= stage);
        self.rules.insert(at, rule);
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn type_message(&self) -> &'static str {
        self.type_message
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run presence, coercion and every rule; the first failure wins.
    pub fn check(&self, raw: Option<&Value>) -> Result<Checked, FieldError> {
        let value = match raw {
            None | Some(Value::Null) => {
                return Err(FieldError::new(
                    ErrorKind::RequiredMissing,
                    "required",
                    REQUIRED_MESSAGE,
                ));
            }
            Some(value) => value,
        };

        let checked = self.coerce(value).ok_or_else(|| {
            FieldError::new(ErrorKind::TypeMismatch, "type", self.type_message)
        })?;

        match self.rules.iter().find(|r| !r.predicate.holds(&checked)) {
            Some(rule) => Err(rule.error()),
            None => Ok(checked),
        }
    }

    fn coerce(&self, value: &Value) -> Option<Checked> {
        match (self.value_type, value) {
            (ValueType::Text, Value::String(s)) => Some(Checked::Text(s.clone())),
            (ValueType::Number, Value::Number(n)) => {
                n.as_f64().filter(|n| n.is_finite()).map(Checked::Number)
            }
            (ValueType::Number, Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(Checked::Number)
            }
            _ => None,
        }
    }
}

// ── The product ruleset ───────────────────────────────────────────────────────

/// Rules for the fields of one color variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRules {
    pub id: FieldRules,
    pub color: FieldRules,
    pub price: FieldRules,
    pub image_url: FieldRules,
    pub quantity: FieldRules,
}

/// The complete ruleset for a product draft and its color variants.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRules {
    pub id: FieldRules,
    pub name: FieldRules,
    pub description: FieldRules,
    pub price: FieldRules,
    pub image_url: FieldRules,
    pub quantity: FieldRules,
    pub color: ColorRules,
    limits: Limits,
}

impl ProductRules {
    pub fn new(limits: Limits) -> Self {
        let price = price_rules();
        let image_url = image_url_rules();
        let quantity = quantity_rules(limits.max_quantity);

        Self {
            id: id_rules(),
            name: FieldRules::text("name", "Enter a product name")
                .with(Rule::new(
                    ErrorKind::LengthViolation,
                    "min_length",
                    "Enter a product name with >7 characters",
                    Predicate::MinLength(8),
                ))
                .with(Rule::new(
                    ErrorKind::LengthViolation,
                    "max_length",
                    "Name must be less than 65 characters",
                    Predicate::MaxLength(64),
                ))
                .with(Rule::new(
                    ErrorKind::PatternMismatch,
                    "pattern",
                    "Invalid characters in the name",
                    Predicate::Pattern(TextPattern::ProductText),
                )),
            description: FieldRules::text("description", "Enter a description")
                .with(Rule::new(
                    ErrorKind::LengthViolation,
                    "min_length",
                    "Enter a description with >24 characters",
                    Predicate::MinLength(25),
                ))
                .with(Rule::new(
                    ErrorKind::LengthViolation,
                    "max_length",
                    "Description must be less than 251 characters",
                    Predicate::MaxLength(250),
                ))
                .with(Rule::new(
                    ErrorKind::PatternMismatch,
                    "pattern",
                    "Invalid characters in the description",
                    Predicate::Pattern(TextPattern::ProductText),
                )),
            price: price.clone(),
            image_url: image_url.clone(),
            quantity: quantity.clone(),
            color: ColorRules {
                id: id_rules(),
                color: FieldRules::text("color", "Enter a color name").with(Rule::new(
                    ErrorKind::PatternMismatch,
                    "pattern",
                    "Invalid characters in the color",
                    Predicate::Pattern(TextPattern::ProductText),
                )),
                price,
                image_url,
                quantity,
            },
            limits,
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Top-level field rules in form order.
    pub fn product_fields(&self) -> [&FieldRules; 6] {
        [
            &self.id,
            &self.name,
            &self.description,
            &self.price,
            &self.image_url,
            &self.quantity,
        ]
    }

    /// Color-variant field rules in form order.
    pub fn color_fields(&self) -> [&FieldRules; 5] {
        [
            &self.color.id,
            &self.color.color,
            &self.color.price,
            &self.color.image_url,
            &self.color.quantity,
        ]
    }

    /// Find the rules for a field path such as `name`, `colors.price` or
    /// `colors.3.price` (indices are ignored).
    pub fn lookup(&self, path: &str) -> Result<&FieldRules, DomainError> {
        let unknown = || DomainError::UnknownField {
            field: path.to_string(),
        };

        let mut segments = path.split('.');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("colors"), Some(child), rest) => {
                let child = match rest {
                    Some(leaf) if child.parse::<usize>().is_ok() => leaf,
                    Some(_) => return Err(unknown()),
                    None => child,
                };
                if segments.next().is_some() {
                    return Err(unknown());
                }
                self.color_fields()
                    .into_iter()
                    .find(|f| f.field == child)
                    .ok_or_else(unknown)
            }
            (Some(field), None, None) => self
                .product_fields()
                .into_iter()
                .find(|f| f.field == field)
                .ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

impl Default for ProductRules {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

fn id_rules() -> FieldRules {
    FieldRules::text("id", "Invalid ID").with(Rule::new(
        ErrorKind::InvalidIdentifier,
        "uuid",
        "Invalid ID",
        Predicate::Uuid,
    ))
}

fn price_rules() -> FieldRules {
    FieldRules::number("price", "Enter dollar value, numbers only")
        .with(Rule::new(
            ErrorKind::OutOfRange,
            "min",
            "Enter a positive value (0 if FREE)",
            Predicate::Min(0.0),
        ))
        .with(Rule::new(
            ErrorKind::OutOfRange,
            "max",
            "Price must be less than or equal to $10,000",
            Predicate::Max(MAX_PRICE),
        ))
        .with(Rule::new(
            ErrorKind::CustomRuleViolation,
            "cent_multiple",
            "Price must be a multiple of 0.01",
            Predicate::CentMultiple,
        ))
}

fn image_url_rules() -> FieldRules {
    const MESSAGE: &str = "Enter image file name (gif/jpg/png/bmp) or URL";
    FieldRules::text("imageURL", MESSAGE).with(Rule::new(
        ErrorKind::PatternMismatch,
        "image_extension",
        MESSAGE,
        Predicate::Pattern(TextPattern::ImageFile),
    ))
}

fn quantity_rules(max_quantity: u32) -> FieldRules {
    FieldRules::number("quantity", "Enter a whole number")
        .with(Rule::new(
            ErrorKind::TypeMismatch,
            "whole_number",
            "Quantity must be a whole number",
            Predicate::WholeNumber,
        ))
        .with(Rule::new(
            ErrorKind::OutOfRange,
            "min",
            "Quantity must be a positive number",
            Predicate::Min(0.0),
        ))
        .with(Rule::new(
            ErrorKind::OutOfRange,
            "max",
            format!(
                "Current max-quantity is {} units",
                group_thousands(max_quantity)
            ),
            Predicate::Max(f64::from(max_quantity)),
        ))
}

/// `10000` -> `10,000`.
fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
