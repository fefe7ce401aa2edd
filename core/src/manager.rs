//! Shared handle over the editor session. The lock is taken only to flip
//! state and install results, never across network awaits, so an in-flight
//! save is observable and conflicting actions fail fast with Busy.

use std::sync::Arc;

use deckedit_client::JsonStore;
use deckedit_common::image_ref;
use tokio::sync::Mutex;

use crate::error::{LoadError, SaveError};
use crate::session::{EditorSession, ImageState, SlideWidget};
use crate::{loader, persister};

#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn JsonStore>,
    session: Arc<Mutex<EditorSession>>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn JsonStore>) -> Self {
        Self {
            store,
            session: Arc::new(Mutex::new(EditorSession::new())),
        }
    }

    /// Direct access to the session, for rendering and field editing.
    pub fn session(&self) -> Arc<Mutex<EditorSession>> {
        self.session.clone()
    }

    /// Load `file_name` and replace the active deck with its projection.
    /// Failures are recorded on the session as an inline notice; the error
    /// is also returned for non-interactive callers.
    pub async fn load(&self, file_name: &str) -> Result<(), LoadError> {
        self.session.lock().await.begin_load()?;

        match loader::load(self.store.as_ref(), file_name).await {
            Ok(deck) => {
                let mut widgets = Vec::with_capacity(deck.len());
                for (index, record) in deck.into_iter().enumerate() {
                    let image_path = image_ref(file_name, index);
                    let image = if self.store.image_available(&image_path).await {
                        ImageState::Available
                    } else {
                        ImageState::Missing
                    };
                    widgets.push(SlideWidget::new(record, image_path, image));
                }
                self.session.lock().await.finish_load(file_name, widgets);
                Ok(())
            }
            Err(err) => {
                tracing::error!("load of {} failed: {}", file_name, err);
                self.session.lock().await.fail_load(&err);
                Err(err)
            }
        }
    }

    /// Collect the active deck and save it. The save outcome lands on the
    /// session as a notice; the in-memory deck survives a failure so the
    /// user can retry.
    pub async fn save(&self) -> Result<(), SaveError> {
        let (file_name, deck) = self.session.lock().await.begin_save()?;

        let result = persister::save(self.store.as_ref(), &file_name, &deck).await;
        if let Err(err) = &result {
            tracing::error!("save of {} failed: {}", file_name, err);
        }
        self.session.lock().await.finish_save(&file_name, &result);
        result
    }
}
