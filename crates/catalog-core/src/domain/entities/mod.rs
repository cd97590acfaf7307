pub mod input;
pub mod product;

pub use input::{ColorVariantInput, ProductDraftInput};
pub use product::{ColorVariant, ProductDraft};
