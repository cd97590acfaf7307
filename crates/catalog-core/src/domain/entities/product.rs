//! Accepted, normalized product records.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::Price;

/// A product draft that passed every field rule.
///
/// Ids are always freshly generated at acceptance time; client-supplied ids
/// are never carried over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDraft {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Price,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub quantity: u32,
    pub colors: Vec<ColorVariant>,
}

/// One color variant of an accepted product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorVariant {
    pub id: Uuid,
    pub color: String,
    pub price: Price,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub quantity: u32,
}

impl ProductDraft {
    /// Look up a color variant by its id.
    pub fn color(&self, id: Uuid) -> Option<&ColorVariant> {
        self.colors.iter().find(|c| c.id == id)
    }

    /// Units across the base product and all color variants.
    pub fn total_quantity(&self) -> u64 {
        u64::from(self.quantity)
            + self
                .colors
                .iter()
                .map(|c| u64::from(c.quantity))
                .sum::<u64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> ProductDraft {
        ProductDraft {
            id: Uuid::nil(),
            name: "Product One".into(),
            description: "Description for Product One".into(),
            price: Price::from_cents(1199),
            image_url: "one.jpg".into(),
            quantity: 3,
            colors: vec![ColorVariant {
                id: Uuid::from_u128(7),
                color: "Yellow".into(),
                price: Price::from_cents(1199),
                image_url: "yellow.jpg".into(),
                quantity: 101,
            }],
        }
    }

    #[test]
    fn total_quantity_includes_variants() {
        assert_eq!(product().total_quantity(), 104);
    }

    #[test]
    fn color_lookup_by_id() {
        let p = product();
        assert_eq!(
            p.color(Uuid::from_u128(7)).map(|c| c.color.as_str()),
            Some("Yellow")
        );
        assert!(p.color(Uuid::nil()).is_none());
    }

    #[test]
    fn serializes_with_form_field_names() {
        let json = serde_json::to_value(product()).unwrap();
        assert_eq!(json["imageURL"], "one.jpg");
        assert_eq!(json["price"], 11.99);
        assert_eq!(json["colors"][0]["imageURL"], "yellow.jpg");
    }
}
