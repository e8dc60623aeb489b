//! # mailblast-core
//!
//! Session state and send flow for the mailblast client.
//!
//! This crate provides:
//! - In-memory caches of the server-held contact and attachment lists
//! - Stateless template operations
//! - The draft model with validation and sample-value preview
//! - The mass-send flow (validate, confirm, dispatch) and the single
//!   ad hoc test send
//! - An interaction abstraction so confirmation prompts can be scripted
//!   in tests
//!
//! The caches are exactly that: caches of server truth. They are
//! replaced only at explicit reload points, and a failed reload always
//! leaves the previous state untouched.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod attachments;
mod compose;
mod contacts;
mod error;
mod interact;
mod session;
pub mod templates;

pub use attachments::{
    AttachmentTray, MAX_BATCH_BYTES, MAX_FILE_BYTES, UploadFile, UploadOutcome,
};
pub use compose::{Draft, Preview, SAMPLE_EMAIL, SAMPLE_NAME, SendSummary};
pub use contacts::ContactBook;
pub use error::{Error, Result, ValidationError};
pub use interact::{Interact, Scripted};
pub use session::Session;
