//! CMS Forms CLI
//!
//! Operator command line for composing form definitions and checking
//! submissions against them.
//!
//! # Usage
//!
//! ```bash
//! cmsforms forms create --name "Visa Enquiry"
//! cmsforms fields add <form-id> --label "Email Address" --type email --required
//! cmsforms fields move <form-id> 1 --up
//! cmsforms options add <form-id> 1 --label "UAE"
//! cmsforms validate <form-id> submission.json --format json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cms_forms::{FieldType, FormsConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "cmsforms")]
#[command(version)]
#[command(about = "Compose and check CMS form definitions", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.cms-forms/config.toml)
    #[arg(long, global = true, env = "CMS_FORMS_CONFIG")]
    config: Option<PathBuf>,

    /// Form store directory, overrides the config file
    #[arg(long, global = true, env = "CMS_FORMS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short, global = true, default_value = "table")]
    format: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage forms
    Forms {
        #[command(subcommand)]
        action: FormCommands,
    },
    /// Compose the fields of a form
    Fields {
        #[command(subcommand)]
        action: FieldCommands,
    },
    /// Compose the options of a choice field
    Options {
        #[command(subcommand)]
        action: OptionCommands,
    },
    /// Validate a JSON submission against an active form
    Validate {
        form_id: String,
        /// JSON object keyed by field name
        submission: PathBuf,
    },
    /// Configure the CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum FormCommands {
    /// List forms
    List {
        /// Only forms open to the public
        #[arg(long)]
        active: bool,
    },
    /// Show a form with its fields
    Show { id: String },
    /// Create an empty form
    Create {
        #[arg(long)]
        name: String,
        /// Defaults to a slug of the name
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Image path or URL
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        inactive: bool,
    },
    /// Edit form attributes
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Empty string hands the slug back to the name
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a form and everything in it
    Delete { id: String },
    /// Store a form from a schema document
    Import { file: PathBuf },
    /// Print a form's schema document
    Export { id: String },
    /// Report schema warnings
    Lint { id: String },
}

#[derive(Subcommand)]
enum FieldCommands {
    /// Append a field
    Add {
        form_id: String,
        #[arg(long)]
        label: String,
        #[arg(long = "type", default_value = "text")]
        field_type: FieldType,
        #[arg(long)]
        placeholder: Option<String>,
        #[arg(long)]
        required: bool,
    },
    /// Change a field
    Update {
        form_id: String,
        index: usize,
        #[arg(long)]
        label: Option<String>,
        /// Machine name override
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        field_type: Option<FieldType>,
        #[arg(long, conflicts_with = "clear_placeholder")]
        placeholder: Option<String>,
        #[arg(long)]
        clear_placeholder: bool,
        #[arg(long)]
        required: Option<bool>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Remove a field
    Remove { form_id: String, index: usize },
    /// Move a field one step
    Move {
        form_id: String,
        index: usize,
        #[arg(long, conflicts_with = "down", required_unless_present = "down")]
        up: bool,
        #[arg(long)]
        down: bool,
    },
}

#[derive(Subcommand)]
enum OptionCommands {
    /// Append an option
    Add {
        form_id: String,
        field_index: usize,
        #[arg(long)]
        label: String,
    },
    /// Relabel an option
    Update {
        form_id: String,
        field_index: usize,
        option_index: usize,
        #[arg(long)]
        label: String,
    },
    /// Remove an option
    Remove {
        form_id: String,
        field_index: usize,
        option_index: usize,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a default config file
    Init,
    /// Show the effective configuration
    Show,
}

fn init_tracing(config: &FormsConfig) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = FormsConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    init_tracing(&config);

    if let Commands::Config { action } = cli.command {
        return commands::config::handle(action, &config, cli.config.as_deref(), cli.format);
    }

    let ctx = commands::Context::open(config, cli.format).await?;
    match cli.command {
        Commands::Forms { action } => commands::forms::handle(action, &ctx).await,
        Commands::Fields { action } => commands::fields::handle(action, &ctx).await,
        Commands::Options { action } => commands::options::handle(action, &ctx).await,
        Commands::Validate { form_id, submission } => commands::validate::handle(&form_id, &submission, &ctx).await,
        Commands::Config { .. } => unreachable!("handled before opening the store"),
    }
}
