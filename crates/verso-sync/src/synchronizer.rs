use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;
use chrono::Utc;
use tokio::runtime::Handle;
use tokio::task;
use tracing::{debug, info, warn};

use verso_core::domain::ids::ProjectId;
use verso_core::domain::persisted::{PersistedDocument, ProjectRecord};
use verso_core::domain::song::Song;
use verso_core::errors::{PersistenceFailure, SaveProjectError, Sink};
use verso_core::ports::{DocumentObserver, DocumentSnapshot, LocalStore, RemoteStore, SessionProvider};
use verso_core::services::DocumentStore;

use crate::config::SyncConfig;
use crate::debounce::{Debouncer, SinkState};

/// Estado observable de un sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkStatus {
  pub state: SinkState,
  /// Escrituras completadas con éxito.
  pub writes: u64,
  /// Ciclos remotos saltados por falta de sesión.
  pub skipped: u64,
  /// Último fallo; se limpia con la siguiente escritura correcta.
  pub last_error: Option<PersistenceFailure>,
}

/// Resultado de la carga inicial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
  /// Había un documento guardado y ahora está en el store.
  Restored,
  /// Nada guardado: se mantiene el documento por defecto.
  Empty,
  /// El guardado no se pudo leer o no era válido; se mantiene el documento por defecto.
  Discarded(PersistenceFailure),
}

#[derive(Default)]
struct SinkCounters {
  writes: AtomicU64,
  skipped: AtomicU64,
  last_error: Mutex<Option<PersistenceFailure>>,
}

impl SinkCounters {
  fn record_write(&self) {
    self.writes.fetch_add(1, Ordering::SeqCst);
    if let Ok(mut last) = self.last_error.lock() {
      *last = None;
    }
  }

  fn record_skip(&self) {
    self.skipped.fetch_add(1, Ordering::SeqCst);
  }

  fn record_failure(&self, failure: PersistenceFailure) {
    if let Ok(mut last) = self.last_error.lock() {
      *last = Some(failure);
    }
  }

  fn status(&self, state: SinkState) -> SinkStatus {
    SinkStatus {
      state,
      writes: self.writes.load(Ordering::SeqCst),
      skipped: self.skipped.load(Ordering::SeqCst),
      last_error: self.last_error.lock().ok().and_then(|g| g.clone()),
    }
  }
}

/// Mantiene el almacén local y el remoto consistentes con el documento, a
/// base de guardados diferidos.
///
/// Cada cambio reinicia las dos ventanas. Cuando una vence, el trabajo lee la
/// instantánea **más reciente** (no la del momento de programarlo) y la
/// escribe. Los fallos se registran; nunca tocan el documento en memoria.
pub struct PersistenceSynchronizer {
  local: Arc<dyn LocalStore>,
  remote: Arc<dyn RemoteStore>,
  session: Arc<dyn SessionProvider>,
  latest: Arc<ArcSwapOption<DocumentSnapshot>>,
  local_debounce: Debouncer,
  remote_debounce: Debouncer,
  local_stats: Arc<SinkCounters>,
  remote_stats: Arc<SinkCounters>,
}

impl PersistenceSynchronizer {
  pub fn new(
    config: &SyncConfig,
    local: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteStore>,
    session: Arc<dyn SessionProvider>,
    runtime: Handle,
  ) -> Self {
    Self {
      local,
      remote,
      session,
      latest: Arc::new(ArcSwapOption::empty()),
      local_debounce: Debouncer::new("local", config.local_window(), runtime.clone()),
      remote_debounce: Debouncer::new("remote", config.remote_window(), runtime),
      local_stats: Arc::new(SinkCounters::default()),
      remote_stats: Arc::new(SinkCounters::default()),
    }
  }

  /// Consulta el almacén local una vez y, si hay documento válido, lo
  /// coloca en `store` antes de que empiece la edición.
  pub async fn load_initial(&self, store: &mut DocumentStore) -> LoadOutcome {
    let local = Arc::clone(&self.local);
    let loaded = match task::spawn_blocking(move || local.load()).await {
      Ok(Ok(Some(doc))) => doc,
      Ok(Ok(None)) => {
        debug!("no saved document; starting from default");
        return LoadOutcome::Empty;
      }
      Ok(Err(e)) => {
        let failure = PersistenceFailure::local(e);
        warn!(error = %failure, "saved document unreadable; keeping default");
        return LoadOutcome::Discarded(failure);
      }
      Err(e) => {
        let failure = PersistenceFailure::local(e);
        warn!(error = %failure, "local load task failed; keeping default");
        return LoadOutcome::Discarded(failure);
      }
    };

    match loaded.into_song() {
      Ok(song) => {
        store.hydrate(song);
        info!("saved document restored");
        LoadOutcome::Restored
      }
      Err(e) => {
        let failure = PersistenceFailure::local(e);
        warn!(error = %failure, "saved document invalid; keeping default");
        LoadOutcome::Discarded(failure)
      }
    }
  }

  /// Guardado explícito: sin debounce, escritura remota inmediata con id de
  /// proyecto nuevo.
  pub async fn save_project(&self, song: &Song) -> Result<ProjectId, SaveProjectError> {
    if self.session.current_user().is_none() {
      return Err(SaveProjectError::AuthRequired);
    }

    let project = ProjectRecord::new(song, Utc::now());
    match self.remote.save_project(&project).await {
      Ok(()) => {
        info!(project = %project.id, "project saved");
        Ok(project.id)
      }
      Err(e) => {
        let failure = PersistenceFailure::remote(e);
        warn!(error = %failure, "project save failed");
        Err(SaveProjectError::Failed(failure))
      }
    }
  }

  /// Cancela los dos guardados pendientes sin ejecutarlos.
  pub fn end_session(&self) {
    let local = self.local_debounce.cancel();
    let remote = self.remote_debounce.cancel();
    debug!(local, remote, "session ended; pending saves canceled");
  }

  pub fn status(&self, sink: Sink) -> SinkStatus {
    match sink {
      Sink::Local => self.local_stats.status(self.local_debounce.state()),
      Sink::Remote => self.remote_stats.status(self.remote_debounce.state()),
    }
  }

  fn schedule_local(&self) {
    let latest = Arc::clone(&self.latest);
    let store = Arc::clone(&self.local);
    let stats = Arc::clone(&self.local_stats);

    self.local_debounce.schedule(move || async move {
      let Some(snapshot) = latest.load_full() else { return };
      let doc = PersistedDocument::from_song(&snapshot.song, Utc::now());

      // diesel/sqlite bloquea: fuera del runtime
      let failure = match task::spawn_blocking(move || store.save(&doc)).await {
        Ok(Ok(())) => {
          stats.record_write();
          debug!(version = snapshot.version, "local save done");
          return;
        }
        Ok(Err(e)) => PersistenceFailure::local(e),
        Err(e) => PersistenceFailure::local(e),
      };
      warn!(version = snapshot.version, error = %failure, "local save failed");
      stats.record_failure(failure);
    });
  }

  fn schedule_remote(&self) {
    let latest = Arc::clone(&self.latest);
    let remote = Arc::clone(&self.remote);
    let session = Arc::clone(&self.session);
    let stats = Arc::clone(&self.remote_stats);

    self.remote_debounce.schedule(move || async move {
      // la sesión se consulta al vencer la ventana, no al programar
      let Some(user) = session.current_user() else {
        stats.record_skip();
        debug!("no authenticated session; remote save skipped");
        return;
      };
      let Some(snapshot) = latest.load_full() else { return };
      let doc = PersistedDocument::from_song(&snapshot.song, Utc::now());

      match remote.save_for_user(&user, &doc).await {
        Ok(()) => {
          stats.record_write();
          debug!(version = snapshot.version, user = %user, "remote save done");
        }
        Err(e) => {
          let failure = PersistenceFailure::remote(e);
          warn!(version = snapshot.version, error = %failure, "remote save failed");
          stats.record_failure(failure);
        }
      }
    });
  }
}

impl DocumentObserver for PersistenceSynchronizer {
  fn document_changed(&self, snapshot: &DocumentSnapshot) {
    self.latest.store(Some(Arc::new(snapshot.clone())));
    self.schedule_local();
    self.schedule_remote();
  }
}
