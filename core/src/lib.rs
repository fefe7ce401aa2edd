//! Editor core: the load/edit/save cycle for slide-deck JSON documents.

pub mod config;
pub mod error;
pub mod loader;
pub mod manager;
pub mod persister;
pub mod session;

pub use config::Config;
pub use error::{LoadError, SaveError};
pub use manager::SessionManager;
pub use session::{EditorSession, Field, ImageState, Notice, SessionState, SlideWidget};
