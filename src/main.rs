//! party-planner - curate contact lists and text everyone individually
//!
//! JSON lists on disk, Contacts.app sync via JXA, sending via AppleScript.
//! With no subcommand, starts the interactive planner.
//!
//! CHANGELOG:
//! - 10/19/2026 - Load .env before parsing flags
//! - 10/19/2026 - Party planner commands, env-backed global flags
//! - 01/10/2026 - Initial scaffold with CLI skeleton (Claude)

use clap::{Parser, Subcommand};
use party_planner::commands::{self, Workspace};
use party_planner::config::{self, Paths, Settings};
use party_planner::output::{self, OutputControls};
use std::process::ExitCode;

/// Curate contact lists and send personalized iMessages, one confirmed text at a time.
#[derive(Parser, Debug)]
#[command(name = "party-planner")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Where lists and the contacts cache live
    #[arg(long, global = true, env = "PARTY_PLANNER_HOME")]
    data_dir: Option<String>,

    /// Anthropic API key for AI-drafted messages
    #[arg(long, global = true, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model used for AI drafts
    #[arg(long, global = true, env = "PARTY_PLANNER_MODEL")]
    model: Option<String>,

    /// Output as JSON (non-interactive commands)
    #[arg(long, global = true)]
    json: bool,

    /// Compact JSON output (no whitespace)
    #[arg(long, global = true)]
    compact: bool,

    /// Comma-separated field allowlist
    #[arg(long, global = true)]
    fields: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive planner (default)
    Shell,

    // =========================================================================
    // LIST COMMANDS
    // =========================================================================
    /// List all party lists
    Lists,

    /// Show the contacts in a list
    Show {
        /// List name
        list: String,
    },

    /// Add a contact to a list (created if missing)
    Add {
        /// List name
        list: String,

        /// Contact name
        name: String,

        /// Phone number (e.g., +14155551234)
        phone: String,
    },

    /// Remove a contact from a list by position
    Remove {
        /// List name
        list: String,

        /// Position as shown by `show` (1-based)
        index: usize,
    },

    /// Delete a list
    Delete {
        /// List name
        list: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    // =========================================================================
    // CONTACT COMMANDS
    // =========================================================================
    /// Refresh the contacts cache from Contacts.app
    Sync,

    /// Search cached contacts by name
    Search {
        /// Name fragment (case-insensitive)
        query: String,
    },

    // =========================================================================
    // MESSAGING COMMANDS
    // =========================================================================
    /// Render a message for every contact in a list without sending
    Preview {
        /// List name
        list: String,

        /// Message template ({name}, {first_name}, {phone})
        #[arg(required = true)]
        template: Vec<String>,
    },

    /// Draft one invitation with AI
    Draft {
        /// What's happening (e.g., "rooftop BBQ Saturday at 6")
        #[arg(required = true)]
        event: Vec<String>,

        /// Recipient's first name
        #[arg(short, long)]
        name: String,

        /// Tone of the message
        #[arg(short, long)]
        vibe: Option<String>,
    },

    /// Send message directly to phone number
    SendByPhone {
        /// Phone number (e.g., +14155551234)
        phone: String,

        /// Message to send
        message: Vec<String>,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with menus or JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    // ./.env feeds clap's `env` lookups; real environment variables win
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "ignoring unreadable .env file");
        }
    }

    let cli = Cli::parse();

    let output_controls = OutputControls {
        json: cli.json,
        compact: cli.compact,
        fields: cli.fields.clone(),
    };

    let paths = Paths::resolve(cli.data_dir.as_deref());
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| config::env_file_value(&paths.env_file(), config::API_KEY_VAR));
    let settings = Settings::new(paths, api_key, cli.model.clone());
    let ws = Workspace::open(settings);

    let result = match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => commands::shell::run(&ws),

        // List commands
        Command::Lists => commands::lists::list(&ws, &output_controls),
        Command::Show { list } => commands::lists::show(&ws, &list, &output_controls),
        Command::Add { list, name, phone } => {
            commands::lists::add(&ws, &list, &name, &phone, &output_controls)
        }
        Command::Remove { list, index } => {
            commands::lists::remove(&ws, &list, index, &output_controls).map(|_| ())
        }
        Command::Delete { list, yes } => commands::lists::delete(&ws, &list, yes, &output_controls),

        // Contact commands
        Command::Sync => commands::contacts::sync(&ws, &output_controls),
        Command::Search { query } => {
            commands::contacts::search(&ws, &query, &output_controls).map(|_| ())
        }

        // Messaging commands
        Command::Preview { list, template } => {
            commands::messaging::preview(&ws, &list, &template.join(" "), &output_controls).map(|_| ())
        }
        Command::Draft { event, name, vibe } => commands::messaging::draft(
            &ws.settings,
            &event.join(" "),
            &name,
            vibe.as_deref(),
            &output_controls,
        ),
        Command::SendByPhone { phone, message } => {
            commands::messaging::send_by_phone(&phone, &message.join(" "), &output_controls)
        }
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            if cli.json {
                println!("{}", output::format_error(&format!("{:#}", e)));
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::from(1)
        }
    }
}
