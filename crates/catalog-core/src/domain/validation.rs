use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::domain::{
    entities::{ColorVariant, ColorVariantInput, ProductDraft, ProductDraftInput},
    error::ErrorKind,
    field::{FieldError, FieldErrors, FieldPath},
    identity::IdGenerator,
    rules::{Checked, FieldRules, Limits, ProductRules},
    value_objects::Price,
};

/// Validates raw drafts against a [`ProductRules`] table.
///
/// Validation is a single stateless pass: every field is checked, every
/// failure is reported, and ids are only drawn from the generator once the
/// whole draft is known to be valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductValidator {
    rules: ProductRules,
}

impl ProductValidator {
    pub fn new(rules: ProductRules) -> Self {
        Self { rules }
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self::new(ProductRules::new(limits))
    }

    pub fn rules(&self) -> &ProductRules {
        &self.rules
    }

    pub fn validate(
        &self,
        input: &ProductDraftInput,
        ids: &dyn IdGenerator,
    ) -> Result<ProductDraft, FieldErrors> {
        let rules = &self.rules;
        let mut errors = FieldErrors::new();

        // Client ids are format-checked but always replaced.
        let client_id = check(&mut errors, FieldPath::new("id"), &rules.id, input.id.as_ref());
        let name = check(&mut errors, FieldPath::new("name"), &rules.name, input.name.as_ref())
            .and_then(Checked::into_text);
        let description = check(
            &mut errors,
            FieldPath::new("description"),
            &rules.description,
            input.description.as_ref(),
        )
        .and_then(Checked::into_text);
        let price = check(&mut errors, FieldPath::new("price"), &rules.price, input.price.as_ref())
            .and_then(|c| c.as_number());
        let image_url = check(
            &mut errors,
            FieldPath::new("imageURL"),
            &rules.image_url,
            input.image_url.as_ref(),
        )
        .and_then(Checked::into_text);
        let quantity = check(
            &mut errors,
            FieldPath::new("quantity"),
            &rules.quantity,
            input.quantity.as_ref(),
        )
        .and_then(|c| c.as_number());
        let colors = self.check_colors(&mut errors, input.colors.as_ref());

        let (
            Some(_),
            Some(name),
            Some(description),
            Some(price),
            Some(image_url),
            Some(quantity),
            true,
        ) = (
            client_id,
            name,
            description,
            price,
            image_url,
            quantity,
            errors.is_empty(),
        ) else {
            debug!(errors = errors.len(), "draft rejected");
            return Err(errors);
        };

        let product = ProductDraft {
            id: ids.generate(),
            name,
            description,
            price: Price::from_dollars(price),
            image_url,
            quantity: quantity as u32,
            colors: colors
                .into_iter()
                .map(|c| ColorVariant {
                    id: ids.generate(),
                    color: c.color,
                    price: Price::from_dollars(c.price),
                    image_url: c.image_url,
                    quantity: c.quantity as u32,
                })
                .collect(),
        };

        debug!(id = %product.id, colors = product.colors.len(), "draft accepted");
        Ok(product)
    }

    /// Validate without keeping the normalized record.
    pub fn check(&self, input: &ProductDraftInput) -> Result<(), FieldErrors> {
        self.validate(input, &NilIds).map(|_| ())
    }

    /// Missing `colors` means no variants; anything other than a list is a
    /// type error at `colors` and no element is inspected.
    fn check_colors(&self, errors: &mut FieldErrors, raw: Option<&Value>) -> Vec<CheckedColor> {
        let base = FieldPath::new("colors");
        let items = match raw {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                errors.insert(
                    base,
                    FieldError::new(ErrorKind::TypeMismatch, "list", "Expected a list of colors"),
                );
                return Vec::new();
            }
        };

        let mut accepted = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let path = base.index(index);
            match item {
                Value::Object(map) => {
                    if let Some(color) = self.check_color(errors, &path, map) {
                        accepted.push(color);
                    }
                }
                _ => errors.insert(
                    path,
                    FieldError::new(ErrorKind::TypeMismatch, "record", "Expected a color record"),
                ),
            }
        }
        accepted
    }

    fn check_color(
        &self,
        errors: &mut FieldErrors,
        path: &FieldPath,
        map: &Map<String, Value>,
    ) -> Option<CheckedColor> {
        let rules = &self.rules.color;
        let input = ColorVariantInput::from_map(map);

        let id = check(errors, path.field("id"), &rules.id, input.id.as_ref());
        let color = check(errors, path.field("color"), &rules.color, input.color.as_ref())
            .and_then(Checked::into_text);
        let price = check(errors, path.field("price"), &rules.price, input.price.as_ref())
            .and_then(|c| c.as_number());
        let image_url = check(
            errors,
            path.field("imageURL"),
            &rules.image_url,
            input.image_url.as_ref(),
        )
        .and_then(Checked::into_text);
        let quantity = check(
            errors,
            path.field("quantity"),
            &rules.quantity,
            input.quantity.as_ref(),
        )
        .and_then(|c| c.as_number());

        trace!(path = %path, "color variant checked");
        Some(CheckedColor {
            color: color?,
            price: price?,
            image_url: image_url?,
            quantity: quantity?,
        })
        .filter(|_| id.is_some())
    }
}

struct CheckedColor {
    color: String,
    price: f64,
    image_url: String,
    quantity: f64,
}

/// Generator for [`ProductValidator::check`], whose output is discarded.
struct NilIds;

impl IdGenerator for NilIds {
    fn generate(&self) -> uuid::Uuid {
        uuid::Uuid::nil()
    }
}

fn check(
    errors: &mut FieldErrors,
    path: FieldPath,
    rules: &FieldRules,
    raw: Option<&Value>,
) -> Option<Checked> {
    match rules.check(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            trace!(path = %path, kind = %err.kind, "field rejected");
            errors.insert(path, err);
            None
        }
    }
}
