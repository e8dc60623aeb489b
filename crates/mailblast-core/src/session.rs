//! The screen session: caches, draft, and the send flow.

use mailblast_api::{ApiClient, Contact, SendReport, SendRequest, SendType};
use tracing::{error, info};
use url::Url;

use crate::attachments::{AttachmentTray, UploadFile, UploadOutcome};
use crate::compose::{Draft, SendSummary};
use crate::contacts::ContactBook;
use crate::error::{Error, Result, ValidationError};
use crate::interact::Interact;
use crate::templates;

/// Default recipient name for the ad hoc test send.
const TEST_NAME: &str = "Teste";

/// A validated send waiting for the user's confirmation.
#[derive(Debug)]
struct PendingSend {
    request: SendRequest,
    summary: SendSummary,
}

/// One composition session: created when the screen mounts, dropped on
/// navigation away.
///
/// The mass-send flow runs validate → confirm → dispatch. A successful
/// [`Session::prepare_mass_send`] parks the fully-built request in
/// `pending`; [`Session::confirm_mass_send`] dispatches it and
/// [`Session::abandon_send`] drops it. Validation failures never reach
/// `pending`, so there is nothing to clean up on that path.
#[derive(Debug)]
pub struct Session {
    api: ApiClient,
    /// Contact cache with deferred persistence.
    pub contacts: ContactBook,
    /// Attachment cache, refreshed wholesale after each mutation.
    pub attachments: AttachmentTray,
    /// The message being composed.
    pub draft: Draft,
    pending: Option<PendingSend>,
}

impl Session {
    /// Creates a session over the given API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            contacts: ContactBook::new(),
            attachments: AttachmentTray::new(),
            draft: Draft::default(),
            pending: None,
        }
    }

    /// The API client this session talks through.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Best-effort initial load of the contact and attachment lists.
    /// Each failure is logged and leaves that list in its prior state.
    pub async fn init(&mut self) {
        if let Err(err) = self.contacts.load(&self.api).await {
            error!("initial contact load failed: {err}");
        }
        if let Err(err) = self.attachments.refresh(&self.api).await {
            error!("initial attachment load failed: {err}");
        }
        info!(
            contacts = self.contacts.len(),
            attachments = self.attachments.len(),
            "session initialized"
        );
    }

    // ── Contacts ────────────────────────────────────────────────

    /// Prompts for email and name and appends to the contact cache.
    /// Persistence stays deferred until [`Session::save_contacts`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the email prompt is cancelled, or
    /// [`ValidationError::InvalidEmail`] for an address without `@`.
    pub fn add_contact(&mut self, ui: &mut dyn Interact) -> Result<()> {
        let Some(email) = ui.input("Email") else {
            return Err(Error::Cancelled);
        };
        if !email.contains('@') {
            return Err(ValidationError::InvalidEmail(email).into());
        }
        let name = ui.input("Name (optional)").unwrap_or_default();
        self.contacts.add(&email, &name)?;
        Ok(())
    }

    /// Confirms and removes the contact at `index` from the cache.
    /// Out-of-range indices are a silent no-op returning `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the user declines.
    pub fn remove_contact(
        &mut self,
        index: usize,
        ui: &mut dyn Interact,
    ) -> Result<Option<Contact>> {
        if !ui.confirm("Remove this contact?") {
            return Err(Error::Cancelled);
        }
        Ok(self.contacts.remove(index))
    }

    /// Replaces the contact cache and raw mirror from the server.
    ///
    /// # Errors
    ///
    /// Returns the API error; the cache is unchanged on failure.
    pub async fn load_contacts(&mut self) -> Result<()> {
        self.contacts.load(&self.api).await
    }

    /// Persists the contact raw text and reloads the cache.
    ///
    /// # Errors
    ///
    /// Returns the API error; the cache is unchanged on failure.
    pub async fn save_contacts(&mut self) -> Result<()> {
        self.contacts.save(&self.api).await
    }

    // ── Templates ───────────────────────────────────────────────

    /// Prompts for a name and stores the draft's HTML body as a
    /// template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] on a cancelled prompt,
    /// [`ValidationError::EmptyTemplateName`] for a blank name, or the
    /// API error.
    pub async fn save_template(&self, ui: &mut dyn Interact) -> Result<String> {
        let Some(name) = ui.input("Template name") else {
            return Err(Error::Cancelled);
        };
        templates::save_as(&self.api, &name, &self.draft.html_body).await?;
        Ok(name)
    }

    /// Confirms and deletes the template named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the user declines, or the API
    /// error.
    pub async fn delete_template(&self, name: &str, ui: &mut dyn Interact) -> Result<()> {
        if !ui.confirm(&format!("Delete template \"{name}\"?")) {
            return Err(Error::Cancelled);
        }
        templates::delete(&self.api, name).await
    }

    /// Loads the named template's content into the draft's HTML body.
    /// Returns whether a template was found; absence is a silent no-op
    /// leaving the draft untouched.
    ///
    /// # Errors
    ///
    /// Returns the API error from the fetch.
    pub async fn load_template_into_draft(&mut self, name: &str) -> Result<bool> {
        match templates::find(&self.api, name).await? {
            Some(template) => {
                self.draft.html_body = template.content;
                info!("template \"{name}\" loaded into draft");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ── Attachments ─────────────────────────────────────────────

    /// Replaces the attachment cache from the server.
    ///
    /// # Errors
    ///
    /// Returns the API error; the cache is unchanged on failure.
    pub async fn refresh_attachments(&mut self) -> Result<()> {
        self.attachments.refresh(&self.api).await
    }

    /// Uploads a batch through the tray (preflight, sequential
    /// requests, single reload).
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the preflight rejects the
    /// batch.
    pub async fn upload_attachments(&mut self, files: Vec<UploadFile>) -> Result<UploadOutcome> {
        self.attachments.upload(&self.api, files).await
    }

    /// Confirms and deletes one attachment, then refreshes the list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the user declines, or the API
    /// error.
    pub async fn remove_attachment(&mut self, filename: &str, ui: &mut dyn Interact) -> Result<()> {
        if !ui.confirm("Remove this attachment?") {
            return Err(Error::Cancelled);
        }
        self.api.delete_attachment(filename).await?;
        self.attachments.refresh(&self.api).await
    }

    /// Confirms and removes every temporary attachment on the server,
    /// then refreshes the list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the user declines, or the API
    /// error.
    pub async fn clean_attachments(&mut self, ui: &mut dyn Interact) -> Result<()> {
        if !ui.confirm("Remove all temporary email attachments?") {
            return Err(Error::Cancelled);
        }
        self.api.clean_attachments().await?;
        self.attachments.refresh(&self.api).await
    }

    /// Builds the browser download URL for an attachment.
    ///
    /// # Errors
    ///
    /// Returns the API error if the filename cannot form a URL.
    pub fn download_url(&self, filename: &str) -> Result<Url> {
        Ok(self.api.download_url(filename)?)
    }

    // ── Send flow ───────────────────────────────────────────────

    /// Validates the draft against the current caches and, on success,
    /// parks the fully-built request for confirmation. Returns the
    /// summary to display.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`]; nothing is retained and no
    /// confirmation should be shown in that case.
    pub fn prepare_mass_send(&mut self) -> Result<SendSummary> {
        self.draft.validate(self.contacts.len())?;

        let request = SendRequest {
            subject: self.draft.subject.trim().to_owned(),
            html_content: self.draft.html_body.trim().to_owned(),
            text_content: self.draft.text_body.trim().to_owned(),
            contacts: self.contacts.contacts().to_vec(),
            attachments: self.attachments.filenames(),
            send_type: self.draft.send_type,
        };
        let summary = SendSummary::for_request(&request);
        self.pending = Some(PendingSend {
            request,
            summary: summary.clone(),
        });
        Ok(summary)
    }

    /// The summary of the send awaiting confirmation, if any.
    #[must_use]
    pub fn pending_summary(&self) -> Option<&SendSummary> {
        self.pending.as_ref().map(|p| &p.summary)
    }

    /// Dispatches the pending send in a single request and surfaces the
    /// backend's report verbatim. The pending payload is consumed either
    /// way; there is no retry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPendingSend`] without a prior successful
    /// `prepare_mass_send`, or the API error.
    pub async fn confirm_mass_send(&mut self) -> Result<SendReport> {
        let pending = self.pending.take().ok_or(Error::NoPendingSend)?;
        info!(
            contacts = pending.summary.contact_count,
            send_type = %pending.summary.send_type,
            "dispatching mass send"
        );
        Ok(self.api.send(&pending.request).await?)
    }

    /// Drops the pending send (the confirmation was dismissed).
    pub fn abandon_send(&mut self) {
        self.pending = None;
    }

    /// Sends the current draft to one ad hoc recipient, bypassing the
    /// contact list and the confirmation step. Uses the same endpoint
    /// and payload shape with a singleton contact and no attachments.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] for an address without
    /// `@`, or the API error.
    pub async fn test_single(&self, email: &str, name: Option<&str>) -> Result<SendReport> {
        if !email.contains('@') {
            return Err(ValidationError::InvalidEmail(email.to_owned()).into());
        }
        let request = SendRequest {
            subject: self.draft.subject.clone(),
            html_content: self.draft.html_body.clone(),
            text_content: self.draft.text_body.clone(),
            contacts: vec![Contact::new(email, name.unwrap_or(TEST_NAME))],
            attachments: Vec::new(),
            send_type: SendType::Individual,
        };
        Ok(self.api.send(&request).await?)
    }

    // ── Logs ────────────────────────────────────────────────────

    /// Fetches the backend send log, passed through as opaque entries.
    ///
    /// # Errors
    ///
    /// Returns the API error on transport or backend failure.
    pub async fn logs(&self) -> Result<Vec<serde_json::Value>> {
        Ok(self.api.logs().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::interact::Scripted;

    fn session() -> Session {
        let url = Url::parse("http://localhost:1").unwrap();
        Session::new(ApiClient::new(url))
    }

    #[test]
    fn add_contact_cancelled_prompt() {
        let mut s = session();
        let mut ui = Scripted::new().cancelling();
        assert!(matches!(s.add_contact(&mut ui), Err(Error::Cancelled)));
        assert!(s.contacts.is_empty());
    }

    #[test]
    fn add_contact_rejects_invalid_email_before_name_prompt() {
        let mut s = session();
        let mut ui = Scripted::new().entering("no-at-sign");
        let err = s.add_contact(&mut ui).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidEmail(_))
        ));
        assert!(s.contacts.is_empty());
    }

    #[test]
    fn add_contact_with_name() {
        let mut s = session();
        let mut ui = Scripted::new().entering("a@b.com").entering("Ana");
        s.add_contact(&mut ui).unwrap();
        assert_eq!(s.contacts.contacts()[0].display(), "Ana <a@b.com>");
    }

    #[test]
    fn remove_contact_declined_leaves_cache() {
        let mut s = session();
        s.contacts.add("a@b.com", "Ana").unwrap();
        let mut ui = Scripted::new().confirming(false);
        assert!(matches!(
            s.remove_contact(0, &mut ui),
            Err(Error::Cancelled)
        ));
        assert_eq!(s.contacts.len(), 1);
    }

    #[test]
    fn prepare_refuses_empty_subject() {
        let mut s = session();
        s.contacts.add("a@b.com", "").unwrap();
        s.draft.html_body = "<p>oi</p>".to_owned();
        let err = s.prepare_mass_send().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptySubject)
        ));
        assert!(s.pending_summary().is_none());
    }

    #[test]
    fn prepare_refuses_empty_bodies() {
        let mut s = session();
        s.contacts.add("a@b.com", "").unwrap();
        s.draft.subject = "Oi".to_owned();
        let err = s.prepare_mass_send().unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyBody)));
        assert!(s.pending_summary().is_none());
    }

    #[test]
    fn prepare_refuses_empty_contacts() {
        let mut s = session();
        s.draft.subject = "Oi".to_owned();
        s.draft.html_body = "<p>oi</p>".to_owned();
        let err = s.prepare_mass_send().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NoContacts)
        ));
        assert!(s.pending_summary().is_none());
    }

    #[test]
    fn prepare_builds_summary_and_parks_payload() {
        let mut s = session();
        s.contacts.add("a@b.com", "Ana").unwrap();
        s.contacts.add("c@d.com", "").unwrap();
        s.draft.subject = " Oi ".to_owned();
        s.draft.html_body = "<p>oi</p>".to_owned();
        s.draft.send_type = SendType::Bcc;

        let summary = s.prepare_mass_send().unwrap();
        assert_eq!(summary.subject, "Oi");
        assert_eq!(summary.contact_count, 2);
        assert_eq!(summary.attachment_count, 0);
        assert_eq!(summary.send_type, SendType::Bcc);
        assert_eq!(summary.html_chars, 9);
        assert!(s.pending_summary().is_some());
    }

    #[test]
    fn abandon_drops_pending() {
        let mut s = session();
        s.contacts.add("a@b.com", "").unwrap();
        s.draft.subject = "Oi".to_owned();
        s.draft.html_body = "<p>oi</p>".to_owned();
        s.prepare_mass_send().unwrap();

        s.abandon_send();
        assert!(s.pending_summary().is_none());
    }

    #[tokio::test]
    async fn confirm_without_prepare_is_an_error() {
        let mut s = session();
        assert!(matches!(
            s.confirm_mass_send().await,
            Err(Error::NoPendingSend)
        ));
    }

    #[tokio::test]
    async fn test_single_rejects_invalid_email_without_network() {
        // Backend at a closed port: an attempted request would fail with
        // an HTTP error, not a validation error.
        let s = session();
        let err = s.test_single("invalid", None).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidEmail(_))
        ));
    }
}
