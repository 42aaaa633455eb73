use std::path::PathBuf;

use clap::{Parser, Subcommand};
use labquote::AppError;

#[derive(Parser)]
#[command(name = "labquote")]
#[command(version)]
#[command(
    about = "Validate, price, and submit supplement manufacturing quote requests",
    long_about = None
)]
struct Cli {
    /// Path to a labquote.toml configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the ingredient catalog with per-gram prices
    #[clap(visible_alias = "f")]
    Formulas,
    /// Check a quote draft against the field and formula rules
    #[clap(visible_alias = "v")]
    Validate {
        /// Quote draft file (.yml, .yaml, or .json)
        draft: PathBuf,
    },
    /// Compute the price estimate for a quote draft
    #[clap(visible_alias = "p")]
    Price {
        /// Quote draft file (.yml, .yaml, or .json)
        draft: PathBuf,
    },
    /// Send a quote draft to the configured gateway
    #[clap(visible_alias = "s")]
    Submit {
        /// Quote draft file (.yml, .yaml, or .json)
        draft: PathBuf,
        /// Completed CAPTCHA verification token
        #[arg(short, long)]
        token: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result: Result<(), AppError> = match cli.command {
        Commands::Formulas => labquote::formulas(config).map(|_| ()),
        Commands::Validate { draft } => labquote::validate(&draft, config).and_then(|outcome| {
            if outcome.error_count > 0 {
                Err(AppError::ValidationFailed { count: outcome.error_count })
            } else {
                Ok(())
            }
        }),
        Commands::Price { draft } => labquote::price(&draft, config).map(|_| ()),
        Commands::Submit { draft, token } => labquote::submit(&draft, &token, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
