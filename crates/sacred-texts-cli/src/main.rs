//! Sacred Texts CLI — entry point.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use sacred_texts::{ProviderRegistry, SacredTextsClient, Tradition};

use commands::verify_cmd::VerifyArgs;

#[derive(Parser)]
#[command(
    name = "sacred-texts",
    about = "Look up scripture passages across public APIs and check study resource links",
    version
)]
struct Cli {
    /// Print machine-readable JSON instead of formatted text.
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Provider credential as PROVIDER=SECRET. Repeatable.
    /// Also reads SACRED_TEXTS_<PROVIDER>_KEY env vars.
    #[arg(long = "credential", global = true, value_parser = config::parse_credential)]
    credentials: Vec<(String, String)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a passage, trying each provider for the tradition in order.
    ///
    /// Examples:
    ///   sacred-texts text bible "John 3:16"
    ///   sacred-texts text quran 2:255 --translation 20
    ///   sacred-texts text hindu 2.47
    Text {
        /// Tradition (bible, quran, buddhist, hindu, sikh).
        #[arg(value_parser = parse_tradition)]
        tradition: Tradition,

        /// Reference in the tradition's own notation.
        reference: String,

        /// Translation or edition identifier.
        #[arg(short, long)]
        translation: Option<String>,
    },

    /// List providers in fallback order.
    Providers {
        /// Only list providers for this tradition.
        #[arg(short, long, value_parser = parse_tradition)]
        tradition: Option<Tradition>,
    },

    /// Search for passages by keyword.
    Search {
        /// Search terms.
        query: String,

        /// Restrict to a single tradition.
        #[arg(short, long, value_parser = parse_tradition)]
        tradition: Option<Tradition>,

        /// Maximum number of results.
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Check that resource links still resolve.
    Verify {
        /// Check a single URL instead of the catalog.
        #[arg(long)]
        url: Option<String>,

        /// JSON catalog to check. Also reads SACRED_TEXTS_CATALOG.
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Write the results map to this file as JSON.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit non-zero if any resource failed.
        #[arg(long)]
        strict: bool,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   sacred-texts completions bash > ~/.local/share/bash-completion/completions/sacred-texts
    ///   sacred-texts completions zsh > ~/.zfunc/_sacred-texts
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn parse_tradition(raw: &str) -> Result<Tradition, String> {
    raw.parse::<Tradition>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let json = cli.json;
    let client = || {
        let registry = ProviderRegistry::builtin();
        let config = config::resolve_client_config(&registry, &cli.credentials, config::process_env);
        SacredTextsClient::with_registry(registry, config)
    };

    match &cli.command {
        Commands::Text {
            tradition,
            reference,
            translation,
        } => {
            commands::text_cmd::run(&client(), *tradition, reference, translation.as_deref(), json)
                .await
        }
        Commands::Providers { tradition } => {
            commands::providers_cmd::run(&client(), *tradition, json).await
        }
        Commands::Search {
            query,
            tradition,
            limit,
        } => commands::search_cmd::run(&client(), query, *tradition, *limit, json).await,
        Commands::Verify {
            url,
            catalog,
            output,
            strict,
        } => {
            commands::verify_cmd::run(VerifyArgs {
                url: url.as_deref(),
                catalog: catalog.as_deref(),
                output: output.as_deref(),
                strict: *strict,
                json,
            })
            .await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "sacred-texts", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_text_command() {
        let cli = Cli::try_parse_from([
            "sacred-texts",
            "--credential",
            "esv=abc",
            "text",
            "bible",
            "John 3:16",
            "-t",
            "ESV",
        ])
        .unwrap();
        assert_eq!(cli.credentials, vec![("esv".to_string(), "abc".to_string())]);
        match cli.command {
            Commands::Text {
                tradition,
                reference,
                translation,
            } => {
                assert_eq!(tradition, Tradition::Bible);
                assert_eq!(reference, "John 3:16");
                assert_eq!(translation.as_deref(), Some("ESV"));
            }
            _ => panic!("expected text command"),
        }
    }

    #[test]
    fn test_unknown_tradition_is_rejected() {
        assert!(Cli::try_parse_from(["sacred-texts", "text", "jedi", "1:1"]).is_err());
    }

    #[test]
    fn test_bad_credential_is_rejected() {
        assert!(Cli::try_parse_from(["sacred-texts", "--credential", "nokey", "providers"]).is_err());
    }
}
