//! The REST client, one method per backend endpoint.

use reqwest::multipart;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::types::{Attachment, Contact, ContactListing, SendReport, SendRequest, Template};

const CONTACTS: &str = "/api/email-avancado/contatos";
const TEMPLATES: &str = "/api/email-avancado/templates";
const ATTACHMENTS: &str = "/api/email-avancado/attachments";
const UPLOAD: &str = "/api/email-avancado/upload";
const DOWNLOAD: &str = "/api/email-avancado/download";
const SEND: &str = "/api/email-avancado/send";
const LOGS: &str = "/api/email-avancado/logs";
const CLEAN_ATTACHMENTS: &str = "/api/email-avancado/clean-attachments";

/// Client for the advanced-email backend.
///
/// Cheap to clone is not a goal; one instance lives for the duration of
/// a session and every call borrows it.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the backend at `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// The backend base URL this client talks to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Fetches the server-held contact list.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported one.
    pub async fn contacts(&self) -> Result<ContactListing> {
        debug!("GET {CONTACTS}");
        let resp: ContactsResponse = self
            .http
            .get(self.endpoint(CONTACTS)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if resp.success {
            Ok(ContactListing {
                contacts: resp.contacts,
                raw_content: resp.raw_content,
            })
        } else {
            Err(Error::backend(resp.error))
        }
    }

    /// Persists the raw `email;nome` contact serialization wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported one.
    pub async fn save_contacts(&self, raw: &str) -> Result<()> {
        debug!("POST {CONTACTS}");
        let ack: Ack = self
            .http
            .post(self.endpoint(CONTACTS)?)
            .json(&SaveContactsBody { contacts: raw })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        ack.into_result()
    }

    /// Fetches all stored templates.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported one.
    pub async fn templates(&self) -> Result<Vec<Template>> {
        debug!("GET {TEMPLATES}");
        let resp: TemplatesResponse = self
            .http
            .get(self.endpoint(TEMPLATES)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if resp.success {
            Ok(resp.templates)
        } else {
            Err(Error::backend(resp.error))
        }
    }

    /// Stores a template under `name`, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported one.
    pub async fn save_template(&self, name: &str, content: &str, kind: &str) -> Result<()> {
        debug!("POST {TEMPLATES}");
        let ack: Ack = self
            .http
            .post(self.endpoint(TEMPLATES)?)
            .json(&SaveTemplateBody {
                name,
                content,
                kind,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        ack.into_result()
    }

    /// Deletes the template named `name`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported one.
    pub async fn delete_template(&self, name: &str) -> Result<()> {
        debug!("DELETE {TEMPLATES}");
        let ack: Ack = self
            .http
            .delete(self.endpoint(TEMPLATES)?)
            .json(&NameBody { name })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        ack.into_result()
    }

    /// Fetches the current attachment list.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported one.
    pub async fn attachments(&self) -> Result<Vec<Attachment>> {
        debug!("GET {ATTACHMENTS}");
        let resp: AttachmentsResponse = self
            .http
            .get(self.endpoint(ATTACHMENTS)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if resp.success {
            Ok(resp.attachments)
        } else {
            Err(Error::backend(resp.error))
        }
    }

    /// Uploads one file as a multipart request with field name `file`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported one.
    pub async fn upload_attachment(&self, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        debug!("POST {UPLOAD} ({file_name}, {} bytes)", bytes.len());
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_owned());
        let form = multipart::Form::new().part("file", part);
        let ack: Ack = self
            .http
            .post(self.endpoint(UPLOAD)?)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        ack.into_result()
    }

    /// Deletes the attachment with the given server-assigned filename.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported one.
    pub async fn delete_attachment(&self, filename: &str) -> Result<()> {
        debug!("DELETE {ATTACHMENTS}");
        let ack: Ack = self
            .http
            .delete(self.endpoint(ATTACHMENTS)?)
            .json(&FilenameBody { filename })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        ack.into_result()
    }

    /// Builds the download URL for an attachment. No request is issued;
    /// the caller hands the URL to a browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the filename cannot form a valid URL.
    pub fn download_url(&self, filename: &str) -> Result<Url> {
        self.endpoint(&format!("{DOWNLOAD}/{filename}"))
    }

    /// Dispatches a mass send in a single request.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported one.
    pub async fn send(&self, request: &SendRequest) -> Result<SendReport> {
        debug!(
            "POST {SEND} ({} contacts, {} attachments)",
            request.contacts.len(),
            request.attachments.len()
        );
        let resp: SendResponse = self
            .http
            .post(self.endpoint(SEND)?)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if resp.success {
            Ok(SendReport {
                message: resp.message,
                sent: resp.sent,
                failed: resp.failed,
            })
        } else {
            Err(Error::backend(resp.error))
        }
    }

    /// Fetches the backend send log as opaque JSON entries.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported one.
    pub async fn logs(&self) -> Result<Vec<serde_json::Value>> {
        debug!("GET {LOGS}");
        let resp: LogsResponse = self
            .http
            .get(self.endpoint(LOGS)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if resp.success {
            Ok(resp.logs)
        } else {
            Err(Error::backend(resp.error))
        }
    }

    /// Removes every temporary attachment on the server.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported one.
    pub async fn clean_attachments(&self) -> Result<()> {
        debug!("POST {CLEAN_ATTACHMENTS}");
        let ack: Ack = self
            .http
            .post(self.endpoint(CLEAN_ATTACHMENTS)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        ack.into_result()
    }
}

// ── Request bodies ──────────────────────────────────────────────

#[derive(Serialize)]
struct SaveContactsBody<'a> {
    contacts: &'a str,
}

#[derive(Serialize)]
struct SaveTemplateBody<'a> {
    name: &'a str,
    content: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Serialize)]
struct NameBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct FilenameBody<'a> {
    filename: &'a str,
}

// ── Response envelopes ──────────────────────────────────────────

/// Minimal envelope for endpoints that return no data.
#[derive(Deserialize)]
struct Ack {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl Ack {
    fn into_result(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::backend(self.error))
        }
    }
}

#[derive(Deserialize)]
struct ContactsResponse {
    success: bool,
    #[serde(default)]
    contacts: Vec<Contact>,
    #[serde(default)]
    raw_content: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct TemplatesResponse {
    success: bool,
    #[serde(default)]
    templates: Vec<Template>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct AttachmentsResponse {
    success: bool,
    #[serde(default)]
    attachments: Vec<Attachment>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct SendResponse {
    success: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    sent: u32,
    #[serde(default)]
    failed: u32,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct LogsResponse {
    success: bool,
    #[serde(default)]
    logs: Vec<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(Url::parse("http://localhost:5000").unwrap())
    }

    #[test]
    fn endpoint_joins_onto_base() {
        let url = client().endpoint(CONTACTS).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/email-avancado/contatos");
    }

    #[test]
    fn download_url_carries_filename() {
        let url = client().download_url("abc123.pdf").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/email-avancado/download/abc123.pdf"
        );
    }

    #[test]
    fn ack_maps_success_flag() {
        let ok: Ack = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(ok.into_result().is_ok());

        let err: Ack = serde_json::from_str(r#"{"success":false,"error":"sem espaço"}"#).unwrap();
        match err.into_result() {
            Err(Error::Backend(message)) => assert_eq!(message, "sem espaço"),
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[test]
    fn ack_without_error_field_still_fails() {
        let err: Ack = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(matches!(err.into_result(), Err(Error::Backend(_))));
    }

    #[test]
    fn send_response_counts_default_to_zero() {
        let resp: SendResponse =
            serde_json::from_str(r#"{"success":true,"message":"ok"}"#).unwrap();
        assert_eq!(resp.sent, 0);
        assert_eq!(resp.failed, 0);
    }
}
