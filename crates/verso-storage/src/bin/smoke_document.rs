use anyhow::Context;
use chrono::Utc;
use verso_core::domain::persisted::PersistedDocument;
use verso_core::ports::LocalStore;
use verso_core::services::{DocumentStore, Edit};
use verso_storage::SqliteLocalStore;
use verso_storage::config::StorageConfig;

fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  // DATABASE_URL (p. ej. desde .env) tiene prioridad sobre [storage]
  let store = match std::env::var("DATABASE_URL") {
    Ok(url) => SqliteLocalStore::new(&url),
    Err(_) => SqliteLocalStore::from_config(&StorageConfig::load().context("loading [storage] config")?),
  }
  .context("opening local store")?;

  let mut doc = DocumentStore::default();
  doc.apply(Edit::ImportLyrics("sou lâmina\nsou código\n\nergam-se".into()))?;

  let persisted = PersistedDocument::from_song(doc.song(), Utc::now());
  println!("Saving document with {} strophes", persisted.strophes.len());
  store.save(&persisted)?;

  let loaded = store.load()?.context("document missing right after save")?;
  println!("Round-trip equal: {}", loaded == persisted);
  println!("Loaded from DB: {}", serde_json::to_string_pretty(&loaded)?);

  Ok(())
}
