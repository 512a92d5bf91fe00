//! konform CLI
//!
//! Renders or validates a form declared in a JSON document.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use konform::{Form, FormDocument};

/// Render and validate JSON-declared forms.
#[derive(Parser)]
#[command(name = "konform")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Form document (JSON).
    #[arg(short, long, env = "KONFORM_FORM")]
    form: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the form markup.
    Render {
        /// Data to bind before rendering (JSON object).
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Validate the data first so errors show in the markup.
        #[arg(long)]
        validate: bool,
    },

    /// Validate data and print any errors.
    Validate {
        /// Data to validate (JSON object).
        #[arg(short, long)]
        data: PathBuf,
    },
}

fn load_form(path: &Path) -> anyhow::Result<Form<FormDocument>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading form document {}", path.display()))?;
    let form = FormDocument::from_json(&json)?.into_form()?;
    Ok(form)
}

fn bind(form: &mut Form<FormDocument>, path: &Path) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading data {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    form.bind_json(&value)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut form = load_form(&cli.form)?;
    info!("Loaded form with {} fields.", form.fields().len());

    match cli.command {
        Commands::Render { data, validate } => {
            if let Some(path) = data {
                bind(&mut form, &path)?;
            }
            if validate && !form.validate()? {
                warn!("Data has {} invalid field(s).", form.errors().len());
            }
            print!("{}", form.render()?);
        }

        Commands::Validate { data } => {
            bind(&mut form, &data)?;
            if form.validate()? {
                info!("Data is valid.");
            } else {
                print!("{}", form.errors());
                anyhow::bail!("validation failed for {} field(s)", form.errors().len());
            }
        }
    }

    Ok(())
}
