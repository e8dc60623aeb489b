//! # mailblast-api
//!
//! Typed REST client for the advanced-email dispatch backend.
//!
//! The backend owns all durable state (contacts, templates, attachments,
//! send execution, logs); this crate maps each of its endpoints to one
//! async method on [`ApiClient`] and each wire shape to a serde type.
//!
//! Every JSON response is an envelope carrying `success: bool` plus data
//! or an `error` string. Backend-reported failures surface as
//! [`Error::Backend`] with the message passed through opaquely; transport
//! and decoding failures surface as [`Error::Http`]. There is no retry,
//! timeout, or cancellation logic anywhere in this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::{Error, Result};
pub use types::{
    Attachment, Contact, ContactListing, SendReport, SendRequest, SendType, Template,
};
