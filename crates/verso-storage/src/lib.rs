pub mod config;
pub mod models;
pub mod schema;

use std::sync::Mutex;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, warn};

use verso_core::domain::persisted::PersistedDocument;
use verso_core::ports::{LocalStore, LocalStoreError};

use crate::config::StorageConfig;
use crate::models::{DocumentRow, NewDocumentRow};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Clave de la única fila que guarda el documento en curso.
const CURRENT_SLOT: &str = "current";

/// Almacén local sobre SQLite: una fila con el documento serializado en JSON.
pub struct SqliteLocalStore {
  conn: Mutex<SqliteConnection>,
}

impl SqliteLocalStore {
  /// Abre (o crea) la base de datos y aplica las migraciones pendientes.
  /// Acepta `:memory:`.
  pub fn new(database_url: &str) -> Result<Self, LocalStoreError> {
    let mut conn = SqliteConnection::establish(database_url).map_err(storage)?;
    conn.run_pending_migrations(MIGRATIONS).map_err(|e| LocalStoreError::Storage(e.to_string()))?;
    debug!(database_url, "local store ready");
    Ok(Self { conn: Mutex::new(conn) })
  }

  pub fn from_config(config: &StorageConfig) -> Result<Self, LocalStoreError> {
    let store = Self::new(&config.database_url())?;
    if let Some(mode) = config.journal_mode.as_deref() {
      store.set_journal_mode(mode)?;
    }
    Ok(store)
  }

  fn set_journal_mode(&self, mode: &str) -> Result<(), LocalStoreError> {
    if mode.is_empty() || !mode.chars().all(|c| c.is_ascii_alphabetic()) {
      return Err(LocalStoreError::Storage(format!("invalid journal mode `{mode}`")));
    }
    let mut conn = self.lock()?;
    conn.batch_execute(&format!("PRAGMA journal_mode = {mode};")).map_err(storage)
  }

  fn lock(&self) -> Result<std::sync::MutexGuard<'_, SqliteConnection>, LocalStoreError> {
    self.conn.lock().map_err(|_| LocalStoreError::Storage("connection lock poisoned".into()))
  }
}

fn storage(e: impl std::fmt::Display) -> LocalStoreError {
  LocalStoreError::Storage(e.to_string())
}

impl LocalStore for SqliteLocalStore {
  fn save(&self, doc: &PersistedDocument) -> Result<(), LocalStoreError> {
    use crate::schema::documents::dsl::*;

    let json = serde_json::to_string(doc).map_err(|e| LocalStoreError::Corrupt(e.to_string()))?;
    let stamp = doc.updated_at.to_rfc3339();
    let row = NewDocumentRow { slot: CURRENT_SLOT, body: &json, updated_at: &stamp };

    let mut conn = self.lock()?;
    diesel::insert_into(documents)
      .values(&row)
      .on_conflict(slot)
      .do_update()
      .set((body.eq(json.as_str()), updated_at.eq(stamp.as_str())))
      .execute(&mut *conn)
      .map_err(storage)?;

    debug!(bytes = json.len(), "document saved locally");
    Ok(())
  }

  fn load(&self) -> Result<Option<PersistedDocument>, LocalStoreError> {
    use crate::schema::documents::dsl::*;

    let mut conn = self.lock()?;
    let row = documents
      .find(CURRENT_SLOT)
      .select(DocumentRow::as_select())
      .first::<DocumentRow>(&mut *conn)
      .optional()
      .map_err(storage)?;

    let Some(row) = row else {
      return Ok(None);
    };

    match serde_json::from_str(&row.body) {
      Ok(doc) => Ok(Some(doc)),
      Err(e) => {
        warn!(slot = %row.slot, error = %e, "stored document is corrupt");
        Err(LocalStoreError::Corrupt(e.to_string()))
      }
    }
  }
}
