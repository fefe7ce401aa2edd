use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One unit of deck content. All fields are optional on input (missing
/// fields default to empty strings) and always present on output. A slide
/// has no id; it is identified by its position in the deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    #[serde(default)]
    pub concept: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub slide_content: String,
    #[serde(default)]
    pub timestamp: String,
}

/// The full ordered collection of slides currently being edited.
pub type Deck = Vec<SlideRecord>;

/// The two tolerated top-level forms of a deck document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentShape {
    /// The document root is directly the array of slides.
    Bare,
    /// The document root is an object whose `entries` field holds the
    /// slide array; sibling fields are metadata preserved verbatim on save.
    Wrapped,
}

impl DocumentShape {
    pub fn detect(doc: &Value) -> Self {
        if doc.get("entries").is_some() {
            DocumentShape::Wrapped
        } else {
            DocumentShape::Bare
        }
    }
}

/// Wire body for the persistence endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePayload {
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub data: Value,
}

/// Filename with its extension stripped, used as the image folder name.
pub fn file_stem(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

/// Preview image path for the slide at `index` (0-based): the server lays
/// images out as `images/<stem>/<index+1>.png`.
pub fn image_ref(file_name: &str, index: usize) -> String {
    format!("images/{}/{}.png", file_stem(file_name), index + 1)
}
