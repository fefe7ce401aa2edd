use anyhow::Result;
use clap::{Parser, Subcommand};
use deckedit_client::{HttpStore, JsonStore};
use deckedit_common::{catalog::FILE_CATALOG, Deck};
use deckedit_core::{loader, persister, Config, SessionManager};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "deckedit")]
#[command(about = "Edit slide-deck JSON files served by a deck server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Override the deck server base URL
    #[arg(long)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive deck editing
    Edit {
        /// Deck file to open immediately instead of the picker
        file: Option<String>,
    },
    /// Print the file catalog
    List,
    /// Load a deck and print its records as JSON
    Dump {
        /// Deck file to load
        file: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Save a deck from a local JSON file of records, without the editor
    Save {
        /// Deck file to save to
        file: String,
        /// Local JSON file holding the record array
        input: PathBuf,
    },
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        std::env::set_var("RUST_LOG", "debug");
    }

    if let Some(server) = &cli.server {
        std::env::set_var("DECKEDIT_SERVER", server);
    }

    let config = Config::from_env();
    init_tracing(&config);
    tracing::info!("using deck server at {}", config.server_url);

    let store: Arc<dyn JsonStore> = Arc::new(HttpStore::new(config.server_url.clone()));

    match cli.command {
        Some(Commands::Edit { file }) => {
            let manager = SessionManager::new(store);
            deckedit_tui::run_editor(manager, file).await?;
        }
        Some(Commands::List) => {
            for name in FILE_CATALOG {
                println!("{name}");
            }
        }
        Some(Commands::Dump { file, out }) => {
            dump(store.as_ref(), &file, out).await?;
        }
        Some(Commands::Save { file, input }) => {
            save_records(store.as_ref(), &file, &input).await?;
        }
        None => {
            let manager = SessionManager::new(store);
            deckedit_tui::run_editor(manager, None).await?;
        }
    }

    Ok(())
}

async fn dump(store: &dyn JsonStore, file: &str, out: Option<PathBuf>) -> Result<()> {
    let deck = loader::load(store, file).await?;
    let json = serde_json::to_string_pretty(&deck)?;
    match out {
        Some(path) => {
            tokio::fs::write(&path, json).await?;
            println!("Wrote {} records to {}", deck.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn save_records(store: &dyn JsonStore, file: &str, input: &std::path::Path) -> Result<()> {
    let body = tokio::fs::read_to_string(input).await?;
    let deck: Deck = serde_json::from_str(&body)?;
    persister::save(store, file, &deck).await?;
    println!("Saved {} records to {file}", deck.len());
    Ok(())
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &config.log_path {
        if let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(path) {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .try_init();
            return;
        }
    }

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckedit_client::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn dump_writes_the_collected_deck_to_a_file() {
        let store = MemoryStore::new().with_file("a.json", json!([{"concept": "C1"}]));
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("deck.json");

        dump(&store, "a.json", Some(out.clone())).await.unwrap();

        let written: Deck = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].concept, "C1");
        assert_eq!(written[0].explanation, "");
    }

    #[tokio::test]
    async fn save_records_pushes_a_local_deck_through_the_persister() {
        let store = MemoryStore::new()
            .with_file("deck.json", json!({"entries": [], "title": "Deck"}));
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("records.json");
        std::fs::write(&input, r#"[{"concept": "new"}]"#).unwrap();

        save_records(&store, "deck.json", &input).await.unwrap();

        let persisted = store.document("deck.json").await.unwrap();
        assert_eq!(persisted["title"], json!("Deck"));
        assert_eq!(persisted["entries"][0]["concept"], json!("new"));
    }

    #[tokio::test]
    async fn dump_fails_for_a_missing_deck() {
        let store = MemoryStore::new();
        assert!(dump(&store, "missing.json", None).await.is_err());
    }
}
