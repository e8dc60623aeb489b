//! Subcommand arguments and handlers.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Subcommand};
use mailblast_api::SendType;
use mailblast_core::{Interact, Session, UploadFile, templates};

use crate::prompt::{AssumeYes, TermInteract};
use crate::render;

/// Contact list operations.
#[derive(Subcommand)]
pub enum ContactsCommand {
    /// List the server-held contacts
    List,
    /// Print the raw `email;nome` serialization for bulk edit
    Raw,
    /// Add one contact and persist the list
    Add {
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
        /// Display name (prompted when omitted)
        #[arg(long)]
        name: Option<String>,
    },
    /// Remove a contact by its listed index and persist the list
    Remove {
        /// Index as printed by `contacts list`
        index: usize,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Replace the server list with a raw `email;nome` file
    Import {
        /// File with one `email;nome` line per contact
        file: PathBuf,
    },
}

/// Template operations.
#[derive(Subcommand)]
pub enum TemplatesCommand {
    /// List stored templates
    List,
    /// Print a template's content
    Show {
        /// Template name
        name: String,
        /// Write the content to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Store an HTML file as a template
    Save {
        /// Template name
        name: String,
        /// HTML file to store
        #[arg(long, value_name = "FILE")]
        html_file: PathBuf,
    },
    /// Delete a stored template
    Delete {
        /// Template name
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Attachment operations.
#[derive(Subcommand)]
pub enum AttachmentsCommand {
    /// List uploaded attachments
    List,
    /// Upload files (max 10 MB each, 50 MB per batch)
    Upload {
        /// Files to upload, one request per file
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Remove an attachment by its server-assigned filename
    Remove {
        /// Server-assigned filename as printed by `attachments list`
        filename: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Open an attachment's download URL in the browser
    Download {
        /// Server-assigned filename
        filename: String,
    },
    /// Remove every temporary attachment on the server
    Clean {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Draft content shared by send, test and preview.
#[derive(Args)]
pub struct ComposeArgs {
    /// Message subject
    #[arg(long)]
    pub subject: String,
    /// File with the HTML body
    #[arg(long, value_name = "FILE")]
    pub html_file: Option<PathBuf>,
    /// File with the plain-text body
    #[arg(long, value_name = "FILE")]
    pub text_file: Option<PathBuf>,
}

/// Arguments of the mass send.
#[derive(Args)]
pub struct SendArgs {
    #[command(flatten)]
    pub compose: ComposeArgs,
    /// Load a stored template as the HTML body
    #[arg(long, value_name = "NAME", conflicts_with = "html_file")]
    pub template: Option<String>,
    /// Delivery mode (defaults to the configured one)
    #[arg(long, value_name = "TYPE")]
    pub send_type: Option<SendType>,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Arguments of the single ad hoc test send.
#[derive(Args)]
pub struct TestArgs {
    /// Recipient email address
    #[arg(long)]
    pub to: String,
    /// Recipient name substituted for `{{nome}}`
    #[arg(long)]
    pub name: Option<String>,
    #[command(flatten)]
    pub compose: ComposeArgs,
}

fn interact(yes: bool) -> Box<dyn Interact> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TermInteract)
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}

/// Resolves the contact fields for `contacts add`, prompting for
/// whichever flag was omitted. A cancelled email prompt cancels the
/// operation; a cancelled name prompt means an empty name.
fn resolve_contact(
    email: Option<String>,
    name: Option<String>,
    ui: &mut dyn Interact,
) -> anyhow::Result<(String, String)> {
    let email = match email {
        Some(email) => email,
        None => ui
            .input("Email")
            .ok_or(mailblast_core::Error::Cancelled)?,
    };
    let name = match name {
        Some(name) => name,
        None => ui.input("Name (optional)").unwrap_or_default(),
    };
    Ok((email, name))
}

/// Applies subject and body files to the session draft.
fn apply_compose(session: &mut Session, compose: &ComposeArgs) -> anyhow::Result<()> {
    session.draft.subject = compose.subject.clone();
    if let Some(path) = &compose.html_file {
        session.draft.html_body = read_text(path)?;
    }
    if let Some(path) = &compose.text_file {
        session.draft.text_body = read_text(path)?;
    }
    Ok(())
}

/// Runs the contacts subcommand.
pub async fn contacts(session: &mut Session, command: ContactsCommand) -> anyhow::Result<()> {
    match command {
        ContactsCommand::List => {
            session.load_contacts().await?;
            if session.contacts.is_empty() {
                println!("No contacts.");
            }
            for (index, contact) in session.contacts.contacts().iter().enumerate() {
                println!("{}", render::contact_line(index, contact));
            }
        }
        ContactsCommand::Raw => {
            session.load_contacts().await?;
            println!("{}", session.contacts.raw_text());
        }
        ContactsCommand::Add { email, name } => {
            session.load_contacts().await?;
            let mut ui = TermInteract;
            let (email, name) = resolve_contact(email, name, &mut ui)?;
            session.contacts.add(&email, &name)?;
            session.save_contacts().await?;
            println!("Contact added ({} total).", session.contacts.len());
        }
        ContactsCommand::Remove { index, yes } => {
            session.load_contacts().await?;
            let mut ui = interact(yes);
            match session.remove_contact(index, ui.as_mut())? {
                Some(contact) => {
                    session.save_contacts().await?;
                    println!("Removed {}.", contact.display());
                }
                None => println!("No contact at index {index}."),
            }
        }
        ContactsCommand::Import { file } => {
            session.contacts.set_raw(read_text(&file)?);
            session.save_contacts().await?;
            println!("Imported {} contacts.", session.contacts.len());
        }
    }
    Ok(())
}

/// Runs the templates subcommand.
pub async fn templates_cmd(session: &Session, command: TemplatesCommand) -> anyhow::Result<()> {
    match command {
        TemplatesCommand::List => {
            let templates = templates::list(session.api()).await?;
            if templates.is_empty() {
                println!("No templates stored.");
            }
            for template in &templates {
                println!("{}", render::template_line(template));
            }
        }
        TemplatesCommand::Show { name, out } => {
            match templates::find(session.api(), &name).await? {
                Some(template) => match out {
                    Some(path) => {
                        std::fs::write(&path, &template.content)
                            .with_context(|| format!("could not write {}", path.display()))?;
                        println!("Wrote {} to {}.", template.label(), path.display());
                    }
                    None => println!("{}", template.content),
                },
                None => println!("Template \"{name}\" not found."),
            }
        }
        TemplatesCommand::Save { name, html_file } => {
            let content = read_text(&html_file)?;
            templates::save_as(session.api(), &name, &content).await?;
            println!("Template \"{name}\" saved.");
        }
        TemplatesCommand::Delete { name, yes } => {
            let mut ui = interact(yes);
            session.delete_template(&name, ui.as_mut()).await?;
            println!("Template \"{name}\" deleted.");
        }
    }
    Ok(())
}

/// Runs the attachments subcommand.
pub async fn attachments(session: &mut Session, command: AttachmentsCommand) -> anyhow::Result<()> {
    match command {
        AttachmentsCommand::List => {
            session.refresh_attachments().await?;
            if session.attachments.is_empty() {
                println!("No attachments.");
            }
            for attachment in session.attachments.attachments() {
                println!("{}", render::attachment_line(attachment));
            }
        }
        AttachmentsCommand::Upload { files } => {
            let mut batch = Vec::with_capacity(files.len());
            for path in &files {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .with_context(|| format!("invalid file name: {}", path.display()))?;
                let bytes = std::fs::read(path)
                    .with_context(|| format!("could not read {}", path.display()))?;
                batch.push(UploadFile::new(name, bytes));
            }
            let outcome = session.upload_attachments(batch).await?;
            println!("Uploaded {} file(s).", outcome.uploaded);
            for name in &outcome.failed {
                println!("Failed: {name}");
            }
        }
        AttachmentsCommand::Remove { filename, yes } => {
            let mut ui = interact(yes);
            session.remove_attachment(&filename, ui.as_mut()).await?;
            println!("Attachment {filename} removed.");
        }
        AttachmentsCommand::Download { filename } => {
            let url = session.download_url(&filename)?;
            opener::open(url.as_str())
                .with_context(|| format!("could not open {url} in the browser"))?;
            println!("Opened {url} in the browser.");
        }
        AttachmentsCommand::Clean { yes } => {
            let mut ui = interact(yes);
            session.clean_attachments(ui.as_mut()).await?;
            println!("Temporary attachments removed.");
        }
    }
    Ok(())
}

/// Runs the mass send: load, validate, confirm, dispatch.
pub async fn send(session: &mut Session, args: SendArgs) -> anyhow::Result<()> {
    session.load_contacts().await?;
    session.refresh_attachments().await?;

    apply_compose(session, &args.compose)?;
    if let Some(name) = &args.template
        && !session.load_template_into_draft(name).await?
    {
        bail!("template \"{name}\" not found");
    }
    if let Some(send_type) = args.send_type {
        session.draft.send_type = send_type;
    }

    let summary = session.prepare_mass_send()?;
    println!("{}", render::summary(&summary));

    let mut ui = interact(args.yes);
    if !ui.confirm("Send to every listed contact?") {
        session.abandon_send();
        println!("Send cancelled.");
        return Ok(());
    }

    let report = session.confirm_mass_send().await?;
    println!("{}", render::report(&report));
    Ok(())
}

/// Runs the single ad hoc test send.
pub async fn test(session: &mut Session, args: TestArgs) -> anyhow::Result<()> {
    apply_compose(session, &args.compose)?;
    let report = session.test_single(&args.to, args.name.as_deref()).await?;
    println!("Test email sent to {}.", args.to);
    println!("{}", render::report(&report));
    Ok(())
}

/// Prints a sample-substituted preview of the draft.
pub fn preview(session: &mut Session, compose: &ComposeArgs) -> anyhow::Result<()> {
    apply_compose(session, compose)?;
    println!("{}", render::preview(&session.draft.preview()));
    Ok(())
}

/// Prints the backend send log.
pub async fn logs(session: &Session) -> anyhow::Result<()> {
    let entries = session.logs().await?;
    println!("{} log entries.", entries.len());
    for entry in &entries {
        println!("{}", serde_json::to_string_pretty(entry)?);
    }
    Ok(())
}
