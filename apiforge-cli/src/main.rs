mod commands;

use clap::{Parser, Subcommand};
use commands::{generate, routes};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apiforge", version, about = "apiforge CLI: compose an OpenAPI document from route manifests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the OpenAPI document and write it to disk
    Generate {
        /// Directory holding apiforge.yaml (paths are resolved against it)
        #[arg(short, long, default_value = ".")]
        config_dir: PathBuf,
        /// Configuration profile
        #[arg(short, long, default_value = "dev")]
        profile: String,
        /// Output file, overrides the configured one (.json, .yaml or .yml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List every route module with its method and path
    Routes {
        /// Directory holding apiforge.yaml (paths are resolved against it)
        #[arg(short, long, default_value = ".")]
        config_dir: PathBuf,
        /// Configuration profile
        #[arg(short, long, default_value = "dev")]
        profile: String,
    },
}

#[tokio::main]
async fn main() {
    apiforge_core::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            config_dir,
            profile,
            output,
        } => generate::run(&config_dir, &profile, output).await,
        Commands::Routes {
            config_dir,
            profile,
        } => routes::run(&config_dir, &profile).await,
    };

    if let Err(e) = result {
        eprintln!("{}", colored::Colorize::red(format!("Error: {e}").as_str()));
        std::process::exit(1);
    }
}
