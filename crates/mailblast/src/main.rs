//! mailblast - command-line client for a mass-email dispatch backend.
//!
//! The backend owns contacts, templates, attachments, send execution and
//! logs; this tool drives it: list management, draft preview, and the
//! validate → confirm → send flow.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod commands;
mod config;
mod prompt;
mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use mailblast_api::ApiClient;
use mailblast_core::Session;

use commands::{
    AttachmentsCommand, ComposeArgs, ContactsCommand, SendArgs, TemplatesCommand, TestArgs,
};

#[derive(Parser)]
#[command(name = "mailblast", version, about = "Client for the advanced-email dispatch backend")]
struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the server-held contact list
    Contacts {
        #[command(subcommand)]
        command: ContactsCommand,
    },
    /// Manage stored templates
    Templates {
        #[command(subcommand)]
        command: TemplatesCommand,
    },
    /// Manage uploaded attachments
    Attachments {
        #[command(subcommand)]
        command: AttachmentsCommand,
    },
    /// Send the draft to every contact on the server list
    Send(SendArgs),
    /// Send the draft to a single ad hoc recipient
    Test(TestArgs),
    /// Print the draft with sample values substituted for the tokens
    Preview(ComposeArgs),
    /// Show the backend send log
    Logs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::Config::load();
    let base = cli
        .server
        .unwrap_or_else(|| config.server.base_url.clone());
    let base_url = Url::parse(&base).with_context(|| format!("invalid server URL: {base}"))?;

    let mut session = Session::new(ApiClient::new(base_url));
    session.draft.send_type = config.default_send_type();

    let result = match cli.command {
        Commands::Contacts { command } => commands::contacts(&mut session, command).await,
        Commands::Templates { command } => commands::templates_cmd(&session, command).await,
        Commands::Attachments { command } => commands::attachments(&mut session, command).await,
        Commands::Send(args) => commands::send(&mut session, args).await,
        Commands::Test(args) => commands::test(&mut session, args).await,
        Commands::Preview(args) => commands::preview(&mut session, &args),
        Commands::Logs => commands::logs(&session).await,
    };

    // A declined confirmation is a normal outcome, not a failure.
    match result {
        Err(err)
            if matches!(
                err.downcast_ref::<mailblast_core::Error>(),
                Some(mailblast_core::Error::Cancelled)
            ) =>
        {
            println!("Cancelled.");
            Ok(())
        }
        other => other,
    }
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "mailblast=warn",
        1 => "mailblast=info,mailblast_core=info,mailblast_api=info",
        2 => "mailblast=debug,mailblast_core=debug,mailblast_api=debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
