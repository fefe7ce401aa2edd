pub mod editor;

use anyhow::Result;
use deckedit_core::SessionManager;

/// Run the interactive deck editor. With `open`, that file is loaded
/// immediately instead of starting at the catalog picker.
pub async fn run_editor(manager: SessionManager, open: Option<String>) -> Result<()> {
    editor::EditorApp::new(manager, open).run().await
}
