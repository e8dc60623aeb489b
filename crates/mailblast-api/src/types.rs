//! Wire types shared with the backend.
//!
//! Field names follow the backend's JSON exactly (it is a Portuguese
//! API, so `nome` rather than `name`); Rust-side names are English and
//! mapped with `#[serde(rename = ...)]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A mailing-list recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Email address. The client only accepts addresses containing `@`.
    pub email: String,
    /// Display name (may be empty).
    #[serde(rename = "nome", default)]
    pub name: String,
}

impl Contact {
    /// Creates a new contact.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }

    /// Returns a display string for the contact.
    ///
    /// If a name is present, returns "Name <email>", otherwise just "email".
    #[must_use]
    pub fn display(&self) -> String {
        if self.name.is_empty() {
            self.email.clone()
        } else {
            format!("{} <{}>", self.name, self.email)
        }
    }
}

/// The contact list as held by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactListing {
    /// Parsed contacts, in server order.
    pub contacts: Vec<Contact>,
    /// The raw `email;nome` line serialization used for bulk edit.
    pub raw_content: String,
}

/// A stored email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Unique template name.
    pub name: String,
    /// Template kind as reported by the backend (currently always "html").
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Template body (HTML).
    #[serde(default)]
    pub content: String,
}

impl Template {
    /// Returns the selection label `name (type)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

/// An uploaded attachment as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Server-assigned unique filename; the key for removal and download.
    pub filename: String,
    /// Name the file had when uploaded.
    #[serde(default)]
    pub original_name: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
}

impl Attachment {
    /// Returns the size formatted in KB with one decimal, e.g. `12.3 KB`.
    #[must_use]
    pub fn size_display(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let kb = self.size as f64 / 1024.0;
        format!("{kb:.1} KB")
    }
}

/// Delivery mode, interpreted and executed entirely by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendType {
    /// One separate message per recipient.
    #[default]
    Individual,
    /// Single message with every recipient on copy.
    Cc,
    /// Single message with every recipient on hidden copy.
    Bcc,
}

impl SendType {
    /// Wire string, also accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Cc => "cc",
            Self::Bcc => "bcc",
        }
    }

    /// User-facing label in the backend's locale.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Cc => "Com Cópia (CC)",
            Self::Bcc => "Cópia Oculta (BCC)",
        }
    }
}

impl fmt::Display for SendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SendType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "individual" => Ok(Self::Individual),
            "cc" => Ok(Self::Cc),
            "bcc" => Ok(Self::Bcc),
            other => Err(format!(
                "unknown send type \"{other}\" (expected individual, cc or bcc)"
            )),
        }
    }
}

/// Payload of the mass-send endpoint.
///
/// The full contact list travels in one request; the backend fans out
/// per recipient and reports aggregate counts back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    /// Message subject.
    pub subject: String,
    /// HTML body (may be empty if a plain-text body is present).
    pub html_content: String,
    /// Plain-text body (may be empty if an HTML body is present).
    pub text_content: String,
    /// Recipients for this dispatch.
    pub contacts: Vec<Contact>,
    /// Server-assigned filenames of attachments to include.
    pub attachments: Vec<String>,
    /// Delivery mode.
    pub send_type: SendType,
}

/// Outcome of a send, surfaced verbatim from the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReport {
    /// Backend status message.
    pub message: String,
    /// Number of recipients the backend reports as delivered.
    pub sent: u32,
    /// Number of recipients the backend reports as failed.
    pub failed: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn contact_wire_field_is_nome() {
        let contact: Contact = serde_json::from_str(r#"{"email":"a@b.com","nome":"Ana"}"#).unwrap();
        assert_eq!(contact.email, "a@b.com");
        assert_eq!(contact.name, "Ana");

        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["nome"], "Ana");
        assert!(json.get("name").is_none());
    }

    #[test]
    fn contact_name_defaults_empty() {
        let contact: Contact = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(contact.name, "");
    }

    #[test]
    fn contact_display() {
        assert_eq!(Contact::new("a@b.com", "Ana").display(), "Ana <a@b.com>");
        assert_eq!(Contact::new("a@b.com", "").display(), "a@b.com");
    }

    #[test]
    fn template_wire_field_is_type() {
        let template: Template =
            serde_json::from_str(r#"{"name":"boas-vindas","type":"html","content":"<p>oi</p>"}"#)
                .unwrap();
        assert_eq!(template.kind, "html");
        assert_eq!(template.label(), "boas-vindas (html)");

        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["type"], "html");
    }

    #[test]
    fn attachment_size_display_one_decimal() {
        let attachment = Attachment {
            filename: "abc123.pdf".to_owned(),
            original_name: "report.pdf".to_owned(),
            size: 2560,
        };
        assert_eq!(attachment.size_display(), "2.5 KB");
    }

    #[test]
    fn send_type_wire_strings_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&SendType::Individual).unwrap(),
            "\"individual\""
        );
        assert_eq!(serde_json::to_string(&SendType::Cc).unwrap(), "\"cc\"");
        assert_eq!(serde_json::to_string(&SendType::Bcc).unwrap(), "\"bcc\"");
        assert_eq!("bcc".parse::<SendType>().unwrap(), SendType::Bcc);
        assert!("carbon".parse::<SendType>().is_err());
    }

    #[test]
    fn send_type_labels() {
        assert_eq!(SendType::Individual.label(), "Individual");
        assert_eq!(SendType::Cc.label(), "Com Cópia (CC)");
        assert_eq!(SendType::Bcc.label(), "Cópia Oculta (BCC)");
    }

    #[test]
    fn send_request_payload_shape() {
        let request = SendRequest {
            subject: "Oi".to_owned(),
            html_content: "<p>oi</p>".to_owned(),
            text_content: String::new(),
            contacts: vec![Contact::new("a@b.com", "Ana")],
            attachments: vec!["abc123.pdf".to_owned()],
            send_type: SendType::Bcc,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["subject"], "Oi");
        assert_eq!(json["html_content"], "<p>oi</p>");
        assert_eq!(json["text_content"], "");
        assert_eq!(json["contacts"][0]["nome"], "Ana");
        assert_eq!(json["attachments"][0], "abc123.pdf");
        assert_eq!(json["send_type"], "bcc");
    }
}
