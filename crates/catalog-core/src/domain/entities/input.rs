//! Loosely-typed draft input, as collected by a form layer.
//!
//! Every field is an optional JSON value: text may arrive where a number is
//! expected, numbers may arrive string-encoded, and `colors` may not even be
//! a list. The validator decides what is acceptable; this type only carries
//! the raw shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::{
    entities::product::{ColorVariant, ProductDraft},
    error::DomainError,
};

/// Raw product draft.
///
/// Accepts the original form identifiers (`pId`, `imageURL`) as well as
/// snake-case spellings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraftInput {
    #[serde(default, alias = "pId", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(
        default,
        rename = "imageURL",
        alias = "image_url",
        alias = "imageUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Value>,
}

impl ProductDraftInput {
    /// The form's reset state: fresh id, empty text, zero amounts, no colors.
    pub fn blank(id: Uuid) -> Self {
        Self {
            id: Some(Value::String(id.to_string())),
            name: Some(Value::String(String::new())),
            description: Some(Value::String(String::new())),
            price: Some(Value::from(0)),
            image_url: Some(Value::String(String::new())),
            quantity: Some(Value::from(0)),
            colors: Some(Value::Array(Vec::new())),
        }
    }

    /// Set a field by its form name.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<(), DomainError> {
        let slot = match field {
            "id" | "pId" => &mut self.id,
            "name" => &mut self.name,
            "description" => &mut self.description,
            "price" => &mut self.price,
            "imageURL" | "image_url" | "imageUrl" => &mut self.image_url,
            "quantity" => &mut self.quantity,
            "colors" => &mut self.colors,
            other => {
                return Err(DomainError::UnknownField {
                    field: other.to_string(),
                });
            }
        };
        *slot = Some(value.into());
        Ok(())
    }

    /// Builder-style [`set`](Self::set).
    pub fn with_field(mut self, field: &str, value: impl Into<Value>) -> Result<Self, DomainError> {
        self.set(field, value)?;
        Ok(self)
    }

    /// Append a color variant, turning a missing or non-list `colors` into a list.
    pub fn push_color(&mut self, color: ColorVariantInput) {
        match &mut self.colors {
            Some(Value::Array(items)) => items.push(color.into_value()),
            slot => *slot = Some(Value::Array(vec![color.into_value()])),
        }
    }

    /// Remove the color variant at `index`, if there is one.
    pub fn remove_color(&mut self, index: usize) -> Option<Value> {
        match &mut self.colors {
            Some(Value::Array(items)) if index < items.len() => Some(items.remove(index)),
            _ => None,
        }
    }

    /// Number of entries in `colors` when it is a list.
    pub fn color_count(&self) -> usize {
        match &self.colors {
            Some(Value::Array(items)) => items.len(),
            _ => 0,
        }
    }
}

impl From<&ProductDraft> for ProductDraftInput {
    fn from(product: &ProductDraft) -> Self {
        Self {
            id: Some(Value::String(product.id.to_string())),
            name: Some(Value::String(product.name.clone())),
            description: Some(Value::String(product.description.clone())),
            price: Some(Value::from(product.price.as_dollars())),
            image_url: Some(Value::String(product.image_url.clone())),
            quantity: Some(Value::from(product.quantity)),
            colors: Some(Value::Array(
                product
                    .colors
                    .iter()
                    .map(|c| ColorVariantInput::from(c).into_value())
                    .collect(),
            )),
        }
    }
}

/// Raw color variant, one element of `colors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorVariantInput {
    #[serde(default, alias = "cId", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(
        default,
        rename = "imageURL",
        alias = "image_url",
        alias = "imageUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
}

impl ColorVariantInput {
    /// The variant the form appends on "Add Color".
    pub fn blank(id: Uuid) -> Self {
        Self {
            id: Some(Value::String(id.to_string())),
            color: Some(Value::String(String::new())),
            price: Some(Value::from(0)),
            image_url: Some(Value::String(String::new())),
            quantity: Some(Value::from(0)),
        }
    }

    /// Read a variant from one record of the `colors` list.
    ///
    /// Unknown keys are ignored; JSON `null` counts as absent.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let pick = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| map.get(*k))
                .filter(|v| !v.is_null())
                .cloned()
        };
        Self {
            id: pick(&["id", "cId"]),
            color: pick(&["color"]),
            price: pick(&["price"]),
            image_url: pick(&["imageURL", "image_url", "imageUrl"]),
            quantity: pick(&["quantity"]),
        }
    }

    /// Back to the JSON record shape stored inside `colors`.
    pub fn into_value(self) -> Value {
        let mut map = Map::new();
        let fields = [
            ("id", self.id),
            ("color", self.color),
            ("price", self.price),
            ("imageURL", self.image_url),
            ("quantity", self.quantity),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                map.insert(key.to_string(), value);
            }
        }
        Value::Object(map)
    }
}

impl From<&ColorVariant> for ColorVariantInput {
    fn from(color: &ColorVariant) -> Self {
        Self {
            id: Some(Value::String(color.id.to_string())),
            color: Some(Value::String(color.color.clone())),
            price: Some(Value::from(color.price.as_dollars())),
            image_url: Some(Value::String(color.image_url.clone())),
            quantity: Some(Value::from(color.quantity)),
        }
    }
}
