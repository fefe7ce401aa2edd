use deckedit_client::StoreError;
use thiserror::Error;

/// Failure while reading a deck resource on behalf of a load action.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not load {file_name}: HTTP status {status}")]
    Http { file_name: String, status: u16 },

    #[error("could not load {file_name}: {message}")]
    Transport { file_name: String, message: String },

    #[error("{file_name} is not valid JSON: {source}")]
    Malformed {
        file_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("another operation is in flight")]
    Busy,
}

impl LoadError {
    pub(crate) fn from_store(file_name: &str, err: StoreError) -> Self {
        let file_name = file_name.to_string();
        match err {
            StoreError::Status { status, .. } => LoadError::Http { file_name, status },
            StoreError::Transport { message, .. } => LoadError::Transport { file_name, message },
            StoreError::Parse { source, .. } => LoadError::Malformed { file_name, source },
        }
    }
}

/// Failure while re-deriving shape or submitting a deck on behalf of a
/// save action.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("could not save {file_name}: HTTP status {status}")]
    Http { file_name: String, status: u16 },

    #[error("could not save {file_name}: {message}")]
    Transport { file_name: String, message: String },

    #[error("current content of {file_name} is not valid JSON: {source}")]
    Malformed {
        file_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("another operation is in flight")]
    Busy,

    #[error("no deck is loaded")]
    NothingLoaded,
}

impl SaveError {
    pub(crate) fn from_store(file_name: &str, err: StoreError) -> Self {
        let file_name = file_name.to_string();
        match err {
            StoreError::Status { status, .. } => SaveError::Http { file_name, status },
            StoreError::Transport { message, .. } => SaveError::Transport { file_name, message },
            StoreError::Parse { source, .. } => SaveError::Malformed { file_name, source },
        }
    }
}
