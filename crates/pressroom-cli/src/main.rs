//! # Pressroom CLI
//!
//! Talks to a Pressroom backend from the terminal:
//!
//! ```bash
//! pressroom story 5a1b2c3d4e5f6a7b8c9d0e1f
//! pressroom user jane
//! pressroom shorten https://news.example.com/a --source line --medium social
//! pressroom hash check k3x9a142
//! pressroom visit /tech/5a1b2c3d4e5f6a7b8c9d0e1f --fragment k3x9a142
//! ```
//!
//! Backend and publisher come from `pressroom.toml` or `PRESSROOM__*`
//! environment variables.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use pressroom_client::{ApiClient, MemorySession};
use pressroom_common::models::{SessionUser, Utm};
use pressroom_shell::{AttributionFlow, MemoryHistory, Navigator};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "pressroom")]
#[command(version)]
#[command(about = "Query a Pressroom publishing backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Session token for operations that need one
    #[arg(long, global = true, env = "PRESSROOM_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a story by id
    Story {
        sid: String,
        /// Count this fetch as a view
        #[arg(long)]
        count_view: bool,
    },

    /// Look a user up by username
    User { username: String },

    /// List the publisher's tags
    Tags,

    /// Tag a URL with UTM parameters and shorten it
    Shorten {
        url: String,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        medium: Option<String>,
        #[arg(long)]
        campaign: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },

    /// Register or look up attribution hashes
    Hash {
        #[command(subcommand)]
        command: HashCommands,
    },

    /// Open a page the way a browser would and run the attribution flow
    Visit {
        /// Path with optional query, e.g. `/tech/story?ref=x`
        path: String,
        /// Hash the link arrived with
        #[arg(long)]
        fragment: Option<String>,
    },
}

#[derive(Subcommand)]
enum HashCommands {
    Create {
        hash: String,
        /// Story the hash belongs to
        #[arg(long)]
        sid: Option<String>,
    },
    Check { hash: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    pressroom_common::config::init()?;
    init_logging(cli.log_json);
    let config = pressroom_common::config::get();

    let session = match cli.token {
        Some(token) => MemorySession::signed_in(token, SessionUser::default()),
        None => MemorySession::new(),
    };
    let client = ApiClient::new(config, Arc::new(session))?;
    tracing::debug!(base = %config.api.base_url, publisher = %client.publisher_id(), "client ready");

    match cli.command {
        Commands::Story { sid, count_view } => {
            let story = client.get_story_from_sid(Some(&sid), None, count_view.then_some(true)).await?;
            print_json(&story)?;
        }
        Commands::User { username } => print_json(&client.get_user_from_username(&username).await?)?,
        Commands::Tags => print_json(&client.get_tags().await?)?,
        Commands::Shorten { url, source, medium, campaign, content } => {
            let utm = Utm { source, medium, campaign, content };
            print_json(&client.shorten(&url, &utm).await)?;
        }
        Commands::Hash { command: HashCommands::Create { hash, sid } } => {
            print_json(&client.create_hash(&hash, sid.as_deref()).await?)?;
        }
        Commands::Hash { command: HashCommands::Check { hash } } => print_json(&client.check_hash(&hash).await?)?,
        Commands::Visit { path, fragment } => {
            let href = match fragment {
                Some(f) => format!("{path}#{f}"),
                None => path,
            };
            let mut flow = AttributionFlow::new(Arc::new(client), MemoryHistory::new(&href));
            let Some(task) = flow.mount() else {
                anyhow::bail!("mount produced no attribution work");
            };
            let outcome = task.await?;
            tracing::info!(seq = outcome.seq, registration = ?outcome.registration, checked = ?outcome.checked, "visit done");
            println!("{}", flow.navigator().location());
        }
    }

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured filter.
fn init_logging(json: bool) {
    let filter = &pressroom_common::config::get().log.filter;
    let logs = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.as_str().into()),
        )
        .with_target(true)
        .with_writer(std::io::stderr);
    if json {
        logs.json().init();
    } else {
        logs.init();
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_nested_hash_commands() {
        let cli = Cli::try_parse_from(["pressroom", "hash", "create", "abc", "--sid", "s-1"]).unwrap();
        match cli.command {
            Commands::Hash { command: HashCommands::Create { hash, sid } } => {
                assert_eq!(hash, "abc");
                assert_eq!(sid.as_deref(), Some("s-1"));
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn parses_visit_with_fragment() {
        let cli = Cli::try_parse_from(["pressroom", "visit", "/story-slug", "--fragment", "abc123"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Visit { ref path, fragment: Some(ref f) } if path == "/story-slug" && f == "abc123"
        ));
    }
}
