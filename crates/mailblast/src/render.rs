//! Plain-text rendering of lists, summaries and reports.
//!
//! Report and summary labels are the backend's locale (Portuguese);
//! everything else is tool chrome.

use mailblast_api::{Attachment, Contact, SendReport, Template};
use mailblast_core::{Preview, SendSummary};

/// One numbered contact line, as referenced by `contacts remove`.
pub fn contact_line(index: usize, contact: &Contact) -> String {
    format!("{index:>3}. {}", contact.display())
}

/// One template line with the `name (type)` label.
pub fn template_line(template: &Template) -> String {
    format!("  {}", template.label())
}

/// One attachment line: original name, size in KB, server filename.
pub fn attachment_line(attachment: &Attachment) -> String {
    format!(
        "  {} ({}) [{}]",
        attachment.original_name,
        attachment.size_display(),
        attachment.filename
    )
}

/// The confirmation summary shown before a mass send.
pub fn summary(summary: &SendSummary) -> String {
    format!(
        "Assunto: {}\n\
         Tipo de Envio: {}\n\
         Contatos: {} emails\n\
         Anexos: {} arquivos\n\
         Conteúdo HTML: {} caracteres\n\
         Texto Simples: {} caracteres",
        summary.subject,
        summary.send_type.label(),
        summary.contact_count,
        summary.attachment_count,
        summary.html_chars,
        summary.text_chars,
    )
}

/// The backend's send outcome, counts surfaced verbatim.
pub fn report(report: &SendReport) -> String {
    format!(
        "{}\nEnviados: {}\nFalhas: {}",
        report.message, report.sent, report.failed
    )
}

/// A sample-substituted draft preview.
pub fn preview(preview: &Preview) -> String {
    let html = if preview.html.is_empty() {
        "(sem conteúdo HTML)"
    } else {
        &preview.html
    };
    let text = if preview.text.is_empty() {
        "(sem texto simples)"
    } else {
        &preview.text
    };
    format!(
        "Assunto: {}\n\n--- HTML ---\n{html}\n\n--- Texto ---\n{text}",
        preview.subject
    )
}

#[cfg(test)]
mod tests {
    use mailblast_api::SendType;

    use super::*;

    #[test]
    fn report_uses_backend_labels() {
        let rendered = report(&SendReport {
            message: "Envio concluído".to_owned(),
            sent: 1,
            failed: 0,
        });
        assert!(rendered.contains("Enviados: 1"));
        assert!(rendered.contains("Falhas: 0"));
    }

    #[test]
    fn summary_shows_send_type_label_and_counts() {
        let rendered = summary(&SendSummary {
            subject: "Oi".to_owned(),
            send_type: SendType::Bcc,
            contact_count: 12,
            attachment_count: 2,
            html_chars: 40,
            text_chars: 0,
        });
        assert!(rendered.contains("Cópia Oculta (BCC)"));
        assert!(rendered.contains("Contatos: 12 emails"));
        assert!(rendered.contains("Anexos: 2 arquivos"));
    }

    #[test]
    fn contact_line_is_numbered() {
        let line = contact_line(4, &Contact::new("a@b.com", "Ana"));
        assert_eq!(line, "  4. Ana <a@b.com>");
    }

    #[test]
    fn preview_marks_empty_sections() {
        let rendered = preview(&Preview {
            subject: "Oi".to_owned(),
            html: String::new(),
            text: "olá".to_owned(),
        });
        assert!(rendered.contains("(sem conteúdo HTML)"));
        assert!(rendered.contains("olá"));
    }
}
