//! Document Loader: fetch a deck resource, detect its shape and project it
//! into editable records.

use deckedit_client::JsonStore;
use deckedit_common::{Deck, DocumentShape, SlideRecord};
use serde_json::Value;

use crate::error::LoadError;

/// The slide array of a parsed document, for either shape. A wrapped
/// document contributes its `entries` field; a bare one is the array
/// itself.
pub fn entries_of(doc: &Value) -> &Value {
    match DocumentShape::detect(doc) {
        DocumentShape::Wrapped => &doc["entries"],
        DocumentShape::Bare => doc,
    }
}

fn text_field(slide: &Value, key: &str) -> String {
    slide
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Coerce one slide-like value to a record. Missing fields become empty
/// strings; this is display defaulting, visually indistinguishable from a
/// field that was present but empty.
pub fn coerce_record(slide: &Value) -> SlideRecord {
    SlideRecord {
        concept: text_field(slide, "concept"),
        explanation: text_field(slide, "explanation"),
        slide_content: text_field(slide, "slide_content"),
        timestamp: text_field(slide, "timestamp"),
    }
}

/// Project a parsed document into an ordered deck.
pub fn project_deck(doc: &Value) -> Deck {
    entries_of(doc)
        .as_array()
        .map(|slides| slides.iter().map(coerce_record).collect())
        .unwrap_or_default()
}

/// Fetch and parse `file_name`, yielding its deck. Shape information is
/// not retained here; the persister re-derives it from the then-current
/// content at save time.
pub async fn load(store: &dyn JsonStore, file_name: &str) -> Result<Deck, LoadError> {
    let doc = store
        .fetch(file_name)
        .await
        .map_err(|e| LoadError::from_store(file_name, e))?;
    let deck = project_deck(&doc);
    tracing::info!("loaded {} ({} slides)", file_name, deck.len());
    Ok(deck)
}
