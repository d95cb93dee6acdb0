use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use synced_core::{
    config::patient_data_dir_from_env_value, CoreConfig, PatientRepository, PatientSearchFilter,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod view;

use view::TerminalView;

#[derive(Parser)]
#[command(name = "synced")]
#[command(about = "Browse and search locally synced patient records")]
struct Cli {
    /// Patient data directory (defaults to $PATIENT_DATA_DIR, then /patient_data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List patients, optionally filtered by a name or identifier prefix
    List {
        /// Case-insensitive prefix of a given name, family name or identifier
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Add a patient record
    Add {
        /// Given name(s)
        given: String,
        /// Family name
        family: String,
        /// Patient identifier (optional)
        #[arg(long)]
        identifier: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("synced=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let patient_data_dir = cli.data_dir.unwrap_or_else(|| {
        patient_data_dir_from_env_value(std::env::var("PATIENT_DATA_DIR").ok())
    });
    let cfg = Arc::new(CoreConfig::new(patient_data_dir)?);
    tracing::debug!("patient data dir: {}", cfg.patient_data_dir().display());

    let repository = PatientRepository::new(cfg);

    match cli.command {
        Some(Commands::List { query }) => {
            let mut presenter = PatientSearchFilter::new(repository, TerminalView::default());
            presenter.set_query(query);
            presenter.start()?;
            for line in presenter.view().lines() {
                println!("{line}");
            }
        }
        Some(Commands::Add {
            given,
            family,
            identifier,
        }) => {
            let id = repository.create_patient(identifier, &given, &family)?;
            println!("Added patient with ID: {}", id.simple());
        }
        None => {
            println!("Use 'synced --help' for commands");
        }
    }

    Ok(())
}
