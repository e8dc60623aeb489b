//! The draft model: validation, preview substitution, and the
//! confirmation summary.

use mailblast_api::{SendRequest, SendType};

use crate::error::ValidationError;

/// Sample value substituted for `{{nome}}` in previews.
pub const SAMPLE_NAME: &str = "João Silva";

/// Sample value substituted for `{{email}}` in previews.
pub const SAMPLE_EMAIL: &str = "joao@exemplo.com";

/// The message being composed.
///
/// `{{nome}}` and `{{email}}` tokens in either body are substituted per
/// recipient by the backend at send time; the client only substitutes
/// fixed sample values for preview.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    /// Message subject.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
    /// Plain-text body.
    pub text_body: String,
    /// Delivery mode.
    pub send_type: SendType,
}

impl Draft {
    /// Checks the draft against a contact count, in fixed order: subject,
    /// then body, then contacts. The first failure wins and nothing is
    /// retained.
    ///
    /// # Errors
    ///
    /// Returns the first applicable [`ValidationError`].
    pub fn validate(&self, contact_count: usize) -> Result<(), ValidationError> {
        if self.subject.trim().is_empty() {
            return Err(ValidationError::EmptySubject);
        }
        if self.html_body.trim().is_empty() && self.text_body.trim().is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        if contact_count == 0 {
            return Err(ValidationError::NoContacts);
        }
        Ok(())
    }

    /// Renders the draft with sample values substituted for the
    /// recipient tokens.
    #[must_use]
    pub fn preview(&self) -> Preview {
        Preview {
            subject: self.subject.clone(),
            html: substitute_samples(&self.html_body),
            text: substitute_samples(&self.text_body),
        }
    }
}

/// A sample-substituted rendering of the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Subject, unchanged.
    pub subject: String,
    /// HTML body with sample values in place of tokens.
    pub html: String,
    /// Plain-text body with sample values in place of tokens.
    pub text: String,
}

/// What the user confirms before a mass send goes out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSummary {
    /// Subject of the pending send.
    pub subject: String,
    /// Delivery mode of the pending send.
    pub send_type: SendType,
    /// How many contacts will receive it.
    pub contact_count: usize,
    /// How many attachments it carries.
    pub attachment_count: usize,
    /// Length of the HTML body in characters.
    pub html_chars: usize,
    /// Length of the plain-text body in characters.
    pub text_chars: usize,
}

impl SendSummary {
    /// Summarizes a prepared request.
    #[must_use]
    pub fn for_request(request: &SendRequest) -> Self {
        Self {
            subject: request.subject.clone(),
            send_type: request.send_type,
            contact_count: request.contacts.len(),
            attachment_count: request.attachments.len(),
            html_chars: request.html_content.chars().count(),
            text_chars: request.text_content.chars().count(),
        }
    }
}

fn substitute_samples(content: &str) -> String {
    content
        .replace("{{nome}}", SAMPLE_NAME)
        .replace("{{email}}", SAMPLE_EMAIL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(subject: &str, html: &str, text: &str) -> Draft {
        Draft {
            subject: subject.to_owned(),
            html_body: html.to_owned(),
            text_body: text.to_owned(),
            send_type: SendType::Individual,
        }
    }

    #[test]
    fn validate_requires_subject_first() {
        let err = draft("  ", "<p>oi</p>", "").validate(1);
        assert_eq!(err, Err(ValidationError::EmptySubject));
    }

    #[test]
    fn validate_requires_some_body() {
        let err = draft("Oi", "  ", "").validate(1);
        assert_eq!(err, Err(ValidationError::EmptyBody));
    }

    #[test]
    fn validate_accepts_text_only_body() {
        assert!(draft("Oi", "", "olá").validate(1).is_ok());
    }

    #[test]
    fn validate_requires_contacts_last() {
        let err = draft("Oi", "<p>oi</p>", "").validate(0);
        assert_eq!(err, Err(ValidationError::NoContacts));
    }

    #[test]
    fn preview_substitutes_sample_values() {
        let d = draft(
            "Oi",
            "<p>Olá {{nome}}</p>",
            "Olá {{nome}}, seu email é {{email}}",
        );
        let preview = d.preview();
        assert_eq!(preview.html, "<p>Olá João Silva</p>");
        assert_eq!(
            preview.text,
            "Olá João Silva, seu email é joao@exemplo.com"
        );
    }

    #[test]
    fn preview_substitutes_every_occurrence() {
        let d = draft("Oi", "{{nome}} e {{nome}}", "");
        assert_eq!(d.preview().html, "João Silva e João Silva");
    }

    #[test]
    fn summary_counts_chars_not_bytes() {
        let request = SendRequest {
            subject: "Oi".to_owned(),
            html_content: "Olá".to_owned(),
            text_content: String::new(),
            contacts: vec![],
            attachments: vec!["a.pdf".to_owned()],
            send_type: SendType::Cc,
        };
        let summary = SendSummary::for_request(&request);
        assert_eq!(summary.html_chars, 3);
        assert_eq!(summary.text_chars, 0);
        assert_eq!(summary.attachment_count, 1);
        assert_eq!(summary.send_type, SendType::Cc);
    }
}
