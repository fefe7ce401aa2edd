pub mod catalog;
pub mod types;

pub use types::{image_ref, file_stem, Deck, DocumentShape, SavePayload, SlideRecord};
