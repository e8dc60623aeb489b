//! Error types for the core library.

use thiserror::Error;

/// Client-side validation failures. These are raised before any network
/// call is made and carry the user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Email address without an `@`.
    #[error("Invalid email address: \"{0}\" (must contain '@')")]
    InvalidEmail(String),

    /// The draft subject is empty.
    #[error("The email subject is empty")]
    EmptySubject,

    /// Both the HTML and the plain-text body are empty.
    #[error("The email has no content (HTML or plain text)")]
    EmptyBody,

    /// The contact list is empty.
    #[error("The contact list is empty; add at least one contact")]
    NoContacts,

    /// A template operation was given a blank name.
    #[error("The template name is empty")]
    EmptyTemplateName,

    /// An upload was requested with no files.
    #[error("No files selected for upload")]
    EmptyUploadBatch,

    /// One file in an upload batch exceeds the per-file limit.
    #[error("File \"{name}\" exceeds the 10 MB limit")]
    FileTooLarge {
        /// Name of the offending file.
        name: String,
    },

    /// The combined upload batch exceeds the total limit.
    #[error("Combined file size exceeds the 50 MB limit")]
    BatchTooLarge,
}

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The backend call failed (transport or backend-reported).
    #[error(transparent)]
    Api(#[from] mailblast_api::Error),

    /// Client-side validation rejected the operation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The user declined a confirmation or cancelled a prompt.
    #[error("Operation cancelled")]
    Cancelled,

    /// A send confirmation arrived with no prepared payload.
    #[error("No send is awaiting confirmation")]
    NoPendingSend,
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
