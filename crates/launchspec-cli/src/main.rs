use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::prelude::*;

use launchspec_core::app::{AppCollection, SyncError};
use launchspec_core::domain::{ModelError, ValidationError};
use launchspec_core::impls::InMemoryAppStore;
use launchspec_core::model::{AppModel, BuildError};
use launchspec_core::ports::SequentialIdGenerator;
use launchspec_core::view::{AppForm, FormStyle, View};

#[derive(Parser)]
#[command(name = "launchspec")]
#[command(about = "Validate, format and preview App definitions", long_about = None)]
struct Cli {
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check an App definition against the validation rules
    Validate {
        /// JSON file holding the App attributes
        file: PathBuf,
    },

    /// Print the App as it would be sent, without read-only attributes
    Stringify {
        file: PathBuf,

        /// Spaces per level; 0 prints compact JSON
        #[arg(long, default_value = "2")]
        indent: usize,
    },

    /// Render the edit form as HTML
    Form {
        file: PathBuf,

        /// Only render these attributes (repeatable)
        #[arg(long = "attribute")]
        attributes: Vec<String>,

        /// JSON file overriding the form class names
        #[arg(long, env = "LAUNCHSPEC_FORM_STYLE")]
        style: Option<PathBuf>,
    },

    /// Save the App to an in-memory store and print the persisted state
    Save { file: PathBuf },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveReport {
    id: Option<String>,
    is_new: bool,
    tasks_url: String,
    attributes: serde_json::Value,
}

fn read_json(path: &Path) -> Result<serde_json::Value, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn collection() -> AppCollection {
    AppCollection::new(
        Arc::new(InMemoryAppStore::new()),
        Arc::new(SequentialIdGenerator::new()),
    )
}

fn load_model(collection: &AppCollection, path: &Path) -> Result<AppModel, CliError> {
    let attributes = read_json(path)?;
    Ok(collection.builder().overrides(attributes)?.build()?)
}

fn print_errors(errors: &[ValidationError]) {
    for e in errors {
        println!("{e}");
    }
}

async fn run(command: Commands) -> Result<ExitCode, CliError> {
    let collection = collection();

    match command {
        Commands::Validate { file } => {
            let mut model = load_model(&collection, &file)?;
            if model.is_valid() {
                println!("ok");
                return Ok(ExitCode::SUCCESS);
            }
            print_errors(model.validation_error().unwrap_or_default());
            Ok(ExitCode::FAILURE)
        }

        Commands::Stringify { file, indent } => {
            let model = load_model(&collection, &file)?;
            println!("{}", model.stringify(Some(indent))?);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Form {
            file,
            attributes,
            style,
        } => {
            let model = load_model(&collection, &file)?.into_shared();
            let style = match style {
                Some(path) => serde_json::from_value::<FormStyle>(read_json(&path)?).map_err(
                    |source| CliError::Parse { path, source },
                )?,
                None => FormStyle::default(),
            };

            let mut form = AppForm::standard(model.clone()).style(style);
            if !attributes.is_empty() {
                form = form.only(&attributes);
            }
            // surface current errors the same way a failed edit would
            model.borrow_mut().is_valid();
            println!("{}", form.render().to_html());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Save { file } => {
            let model = load_model(&collection, &file)?.into_shared();
            match collection.save(&model).await {
                Ok(()) => {}
                Err(SyncError::Invalid(errors)) => {
                    print_errors(&errors);
                    return Ok(ExitCode::FAILURE);
                }
                Err(e) => return Err(e.into()),
            }

            let m = model.borrow();
            info!(app_id = m.id().unwrap_or_default(), "saved");
            let report = SaveReport {
                id: m.id().map(str::to_string),
                is_new: m.is_new(),
                tasks_url: m.tasks().url(),
                attributes: m.to_json(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&cli.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
