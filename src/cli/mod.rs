pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "workout")]
#[command(about = "Workout CLI - Operator tasks for the Workout API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Generate a random JWT signing secret")]
    Secret {
        #[arg(long, default_value_t = 64, help = "Secret length in bytes before encoding")]
        bytes: usize,
    },

    #[command(about = "Database schema and connectivity")]
    Db {
        #[command(subcommand)]
        cmd: commands::db::DbCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Secret { bytes } => commands::secret::handle(bytes, output_format),
        Commands::Db { cmd } => commands::db::handle(cmd, output_format).await,
    }
}
