//! Persister: re-derive the document shape from current server state,
//! reassemble the outgoing document and submit it.

use deckedit_client::JsonStore;
use deckedit_common::{DocumentShape, SavePayload, SlideRecord};
use serde_json::Value;

use crate::error::SaveError;

/// One fresh read of the persisted resource, returning the shape derived
/// from it together with the document itself. Shape is deliberately not
/// reused from load time: another process may have rewrapped the file in
/// between, and the save must follow whatever is on disk now.
pub async fn fetch_current(
    store: &dyn JsonStore,
    file_name: &str,
) -> Result<(DocumentShape, Value), SaveError> {
    let doc = store
        .fetch(file_name)
        .await
        .map_err(|e| SaveError::from_store(file_name, e))?;
    let shape = DocumentShape::detect(&doc);
    tracing::debug!("current shape of {}: {:?}", file_name, shape);
    Ok((shape, doc))
}

/// Reassemble the outgoing document. Wrapped: the current object with its
/// `entries` overwritten and every sibling field untouched. Bare: the deck
/// array itself.
pub fn build_payload(
    shape: DocumentShape,
    mut current: Value,
    deck: &[SlideRecord],
) -> serde_json::Result<Value> {
    let entries = serde_json::to_value(deck)?;
    Ok(match shape {
        DocumentShape::Bare => entries,
        DocumentShape::Wrapped => {
            if let Some(obj) = current.as_object_mut() {
                obj.insert("entries".to_string(), entries);
            }
            current
        }
    })
}

/// Save a collected deck to `file_name` through the persistence endpoint.
pub async fn save(
    store: &dyn JsonStore,
    file_name: &str,
    deck: &[SlideRecord],
) -> Result<(), SaveError> {
    let (shape, current) = fetch_current(store, file_name).await?;
    let data = build_payload(shape, current, deck).map_err(|source| SaveError::Malformed {
        file_name: file_name.to_string(),
        source,
    })?;
    let payload = SavePayload {
        file_name: file_name.to_string(),
        data,
    };
    store
        .persist(&payload)
        .await
        .map_err(|e| SaveError::from_store(file_name, e))?;
    tracing::info!("saved {} ({} slides)", file_name, deck.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader;
    use deckedit_client::MemoryStore;
    use serde_json::json;

    fn record(concept: &str) -> SlideRecord {
        SlideRecord {
            concept: concept.to_string(),
            ..SlideRecord::default()
        }
    }

    #[test]
    fn bare_payload_is_the_deck_array_itself() {
        let deck = vec![record("C1")];
        let payload = build_payload(DocumentShape::Bare, json!([{"concept": "old"}]), &deck).unwrap();
        assert_eq!(
            payload,
            json!([{"concept": "C1", "explanation": "", "slide_content": "", "timestamp": ""}])
        );
    }

    #[test]
    fn wrapped_payload_preserves_sibling_metadata() {
        let current = json!({
            "entries": [{"concept": "old"}],
            "title": "Deck",
            "mp3": "audio/demo.mp3"
        });
        let deck = vec![record("X")];
        let payload = build_payload(DocumentShape::Wrapped, current, &deck).unwrap();
        assert_eq!(payload["title"], json!("Deck"));
        assert_eq!(payload["mp3"], json!("audio/demo.mp3"));
        assert_eq!(
            payload["entries"],
            json!([{"concept": "X", "explanation": "", "slide_content": "", "timestamp": ""}])
        );
    }

    #[test]
    fn empty_deck_saves_to_an_empty_array() {
        let payload = build_payload(DocumentShape::Bare, json!([]), &[]).unwrap();
        assert_eq!(payload, json!([]));
    }

    #[tokio::test]
    async fn save_follows_the_shape_currently_on_disk() {
        // Loaded bare, rewrapped by another process before the save.
        let store = MemoryStore::new().with_file("a.json", json!([{"concept": "C1"}]));
        let deck = loader::load(&store, "a.json").await.unwrap();

        store
            .insert("a.json", json!({"entries": [{"concept": "C1"}], "title": "added"}))
            .await;

        save(&store, "a.json", &deck).await.unwrap();
        let persisted = store.document("a.json").await.unwrap();
        assert_eq!(persisted["title"], json!("added"));
        assert_eq!(persisted["entries"][0]["concept"], json!("C1"));
    }

    #[tokio::test]
    async fn unedited_wrapped_round_trip_defaults_fields_and_keeps_meta() {
        let store = MemoryStore::new()
            .with_file("deck.json", json!({"entries": [{"concept": "X"}], "title": "Deck"}));
        let deck = loader::load(&store, "deck.json").await.unwrap();
        save(&store, "deck.json", &deck).await.unwrap();

        assert_eq!(
            store.document("deck.json").await.unwrap(),
            json!({
                "entries": [{"concept": "X", "explanation": "", "slide_content": "", "timestamp": ""}],
                "title": "Deck"
            })
        );
    }

    #[tokio::test]
    async fn round_trip_is_idempotent_for_both_shapes() {
        for doc in [
            json!([{"concept": "C1", "explanation": "E1"}]),
            json!({"entries": [{"concept": "C1", "timestamp": "0_05"}], "mp3": "a.mp3"}),
        ] {
            let store = MemoryStore::new().with_file("d.json", doc);
            let first = loader::load(&store, "d.json").await.unwrap();
            save(&store, "d.json", &first).await.unwrap();
            let second = loader::load(&store, "d.json").await.unwrap();
            assert_eq!(first, second);
        }
    }

    #[tokio::test]
    async fn save_surfaces_persist_rejection_with_status() {
        let store = MemoryStore::new().with_file("a.json", json!([]));
        store.fail_persist(true);
        let err = save(&store, "a.json", &[]).await.unwrap_err();
        match err {
            SaveError::Http { status, .. } => assert_eq!(status, 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn save_fails_when_current_resource_is_gone() {
        let store = MemoryStore::new();
        let err = save(&store, "gone.json", &[record("C1")]).await.unwrap_err();
        match err {
            SaveError::Http { file_name, status } => {
                assert_eq!(file_name, "gone.json");
                assert_eq!(status, 404);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
