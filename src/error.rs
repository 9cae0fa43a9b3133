use serde::Serialize;

/// Client-side validation failure. Never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Project title is required")]
    TitleRequired,
}

/// Any failure from the record or blob backend.
///
/// The `Display` text is shown to the user as-is, so variants carry the
/// backend's own message where one exists.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lock error")]
    Lock,

    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Backend did not return the stored record")]
    EmptyResponse,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Message reported by the session provider, surfaced verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Store(StoreError::Http(e))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Editor is not open")]
    NotOpen,

    #[error("Wait for the image upload to finish")]
    UploadPending,

    #[error("A save is already in progress")]
    AlreadySubmitting,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Serializable error handed to whatever hosts the command layer.
#[derive(Debug, Serialize)]
pub struct CommandError {
    pub message: String,
}

impl From<StoreError> for CommandError {
    fn from(e: StoreError) -> Self {
        CommandError {
            message: e.to_string(),
        }
    }
}

impl From<AuthError> for CommandError {
    fn from(e: AuthError) -> Self {
        CommandError {
            message: e.to_string(),
        }
    }
}

impl From<ValidationError> for CommandError {
    fn from(e: ValidationError) -> Self {
        CommandError {
            message: e.to_string(),
        }
    }
}

impl From<EditorError> for CommandError {
    fn from(e: EditorError) -> Self {
        CommandError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
