use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio::time::sleep;

use verso_core::domain::{PersistedDocument, ProjectRecord, Song, UserId};
use verso_core::errors::{SaveProjectError, Sink};
use verso_core::ports::{LocalStore, LocalStoreError, RemoteError, RemoteStore, StaticSession};
use verso_core::domain::vocab::Architecture;
use verso_core::services::{Edit, StropheField};
use verso_sync::{EditingSession, LoadOutcome, PersistenceSynchronizer, SinkState, SyncConfig};

#[derive(Default)]
struct MemoryLocal {
  saved: Mutex<Vec<PersistedDocument>>,
  preset: Mutex<Option<Result<PersistedDocument, String>>>,
  fail: Mutex<bool>,
}

impl MemoryLocal {
  fn saves(&self) -> Vec<PersistedDocument> {
    self.saved.lock().unwrap().clone()
  }
}

impl LocalStore for MemoryLocal {
  fn save(&self, doc: &PersistedDocument) -> Result<(), LocalStoreError> {
    if *self.fail.lock().unwrap() {
      return Err(LocalStoreError::Storage("disk full".into()));
    }
    self.saved.lock().unwrap().push(doc.clone());
    Ok(())
  }

  fn load(&self) -> Result<Option<PersistedDocument>, LocalStoreError> {
    match self.preset.lock().unwrap().clone() {
      None => Ok(None),
      Some(Ok(doc)) => Ok(Some(doc)),
      Some(Err(cause)) => Err(LocalStoreError::Corrupt(cause)),
    }
  }
}

#[derive(Default)]
struct MemoryRemote {
  user_docs: Mutex<Vec<(UserId, PersistedDocument)>>,
  projects: Mutex<Vec<ProjectRecord>>,
  fail: Mutex<bool>,
  gate: Option<Arc<Semaphore>>,
}

impl MemoryRemote {
  fn gated(gate: Arc<Semaphore>) -> Self {
    Self { gate: Some(gate), ..Self::default() }
  }

  fn user_saves(&self) -> Vec<(UserId, PersistedDocument)> {
    self.user_docs.lock().unwrap().clone()
  }
}

#[async_trait]
impl RemoteStore for MemoryRemote {
  async fn save_for_user(&self, user: &UserId, doc: &PersistedDocument) -> Result<(), RemoteError> {
    if let Some(gate) = &self.gate {
      gate.acquire().await.unwrap().forget();
    }
    if *self.fail.lock().unwrap() {
      return Err(RemoteError::Status(503));
    }
    self.user_docs.lock().unwrap().push((user.clone(), doc.clone()));
    Ok(())
  }

  async fn save_project(&self, project: &ProjectRecord) -> Result<(), RemoteError> {
    if *self.fail.lock().unwrap() {
      return Err(RemoteError::Status(503));
    }
    self.projects.lock().unwrap().push(project.clone());
    Ok(())
  }
}

struct Harness {
  local: Arc<MemoryLocal>,
  remote: Arc<MemoryRemote>,
  session: Arc<StaticSession>,
  sync: Arc<PersistenceSynchronizer>,
}

fn harness_with(local: MemoryLocal, remote: MemoryRemote, session: StaticSession) -> Harness {
  let local = Arc::new(local);
  let remote = Arc::new(remote);
  let session = Arc::new(session);
  let sync = Arc::new(PersistenceSynchronizer::new(
    &SyncConfig::default(),
    local.clone(),
    remote.clone(),
    session.clone(),
    Handle::current(),
  ));
  Harness { local, remote, session, sync }
}

fn harness(signed_in: bool) -> Harness {
  let session =
    if signed_in { StaticSession::signed_in(UserId::new("u-1")) } else { StaticSession::anonymous() };
  harness_with(MemoryLocal::default(), MemoryRemote::default(), session)
}

fn retitle(title: &str) -> Edit {
  let mut info = verso_core::domain::SongInfo::default();
  info.title = title.into();
  Edit::UpdateSongInfo(info)
}

const LOCAL: Duration = Duration::from_millis(2_000);
const REMOTE: Duration = Duration::from_millis(30_000);
const EPS: Duration = Duration::from_millis(10);

#[tokio::test(start_paused = true)]
async fn test_burst_of_changes_coalesces_into_one_write_per_sink() {
  let h = harness(true);
  let (mut session, outcome) = EditingSession::start(h.sync.clone()).await;
  assert_eq!(outcome, LoadOutcome::Empty);

  for i in 0..5 {
    session.apply(retitle(&format!("rascunho {i}"))).unwrap();
    sleep(Duration::from_millis(500)).await;
  }
  assert!(h.local.saves().is_empty());

  sleep(LOCAL).await;
  let saves = h.local.saves();
  assert_eq!(saves.len(), 1);
  assert_eq!(saves[0].song_info.title, "rascunho 4");
  assert!(h.remote.user_saves().is_empty());

  sleep(REMOTE).await;
  let remote = h.remote.user_saves();
  assert_eq!(remote.len(), 1);
  assert_eq!(remote[0].0, UserId::new("u-1"));
  assert_eq!(remote[0].1.song_info.title, "rascunho 4");

  let status = h.sync.status(Sink::Remote);
  assert_eq!(status.writes, 1);
  assert_eq!(status.state, SinkState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_ending_the_session_cancels_pending_saves() {
  let h = harness(true);
  let (mut session, _) = EditingSession::start(h.sync.clone()).await;

  session.apply(retitle("nunca guardado")).unwrap();
  assert_eq!(h.sync.status(Sink::Local).state, SinkState::PendingDebounce);
  sleep(Duration::from_millis(1_000)).await;

  session.end();
  assert_eq!(h.sync.status(Sink::Local).state, SinkState::Idle);

  sleep(REMOTE * 2).await;
  assert!(h.local.saves().is_empty());
  assert!(h.remote.user_saves().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_write_carries_state_at_fire_time() {
  let h = harness(true);
  let (mut session, _) = EditingSession::start(h.sync.clone()).await;
  let strophe = session.song().strophes[0].id;

  session.apply(retitle("primeiro")).unwrap();
  sleep(LOCAL + EPS).await;
  assert_eq!(h.local.saves().len(), 1);

  // el remoto sigue pendiente; el cambio siguiente debe llegar en la misma escritura
  session
    .apply(Edit::UpdateStrophe {
      strophe,
      field: StropheField::Architecture { architecture: Architecture::Epilogue, episode: None },
    })
    .unwrap();
  sleep(REMOTE + EPS).await;

  let remote = h.remote.user_saves();
  assert_eq!(remote.len(), 1);
  let song = remote[0].1.clone().into_song().unwrap();
  assert_eq!(song.song_info.title, "primeiro");
  assert_eq!(song.strophes[0].architecture(), Architecture::Epilogue);
  assert_eq!(h.local.saves().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_remote_save_without_session_is_skipped_not_queued() {
  let h = harness(false);
  let (mut session, _) = EditingSession::start(h.sync.clone()).await;

  session.apply(retitle("anônimo")).unwrap();
  sleep(REMOTE + EPS).await;

  assert_eq!(h.local.saves().len(), 1);
  assert!(h.remote.user_saves().is_empty());
  let status = h.sync.status(Sink::Remote);
  assert_eq!(status.skipped, 1);
  assert_eq!(status.writes, 0);

  // iniciar sesión después no rescata el ciclo perdido
  h.session.sign_in(UserId::new("u-2"));
  sleep(REMOTE + EPS).await;
  assert!(h.remote.user_saves().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_session_is_checked_when_the_window_elapses() {
  let h = harness(false);
  let (mut session, _) = EditingSession::start(h.sync.clone()).await;

  session.apply(retitle("login a meio")).unwrap();
  sleep(Duration::from_secs(5)).await;
  h.session.sign_in(UserId::new("u-3"));

  sleep(REMOTE).await;
  let remote = h.remote.user_saves();
  assert_eq!(remote.len(), 1);
  assert_eq!(remote[0].0, UserId::new("u-3"));
}

#[tokio::test(start_paused = true)]
async fn test_local_failure_is_recorded_and_next_change_retries() {
  let h = harness(true);
  *h.local.fail.lock().unwrap() = true;
  let (mut session, _) = EditingSession::start(h.sync.clone()).await;

  session.apply(retitle("falha")).unwrap();
  sleep(LOCAL + EPS).await;

  let status = h.sync.status(Sink::Local);
  assert_eq!(status.writes, 0);
  let failure = status.last_error.expect("failure recorded");
  assert_eq!(failure.sink, Sink::Local);
  assert_eq!(session.song().song_info.title, "falha");

  *h.local.fail.lock().unwrap() = false;
  session.apply(retitle("de novo")).unwrap();
  sleep(LOCAL + EPS).await;

  let status = h.sync.status(Sink::Local);
  assert_eq!(status.writes, 1);
  assert!(status.last_error.is_none());
  assert_eq!(h.local.saves()[0].song_info.title, "de novo");
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_remote_write_survives_end_of_session() {
  let gate = Arc::new(Semaphore::new(0));
  let h = harness_with(
    MemoryLocal::default(),
    MemoryRemote::gated(gate.clone()),
    StaticSession::signed_in(UserId::new("u-1")),
  );
  let (mut session, _) = EditingSession::start(h.sync.clone()).await;

  session.apply(retitle("em voo")).unwrap();
  sleep(REMOTE + EPS).await;
  assert_eq!(h.sync.status(Sink::Remote).state, SinkState::Writing);

  h.sync.end_session();
  gate.add_permits(1);
  sleep(EPS).await;

  assert_eq!(h.remote.user_saves().len(), 1);
  assert_eq!(h.sync.status(Sink::Remote).state, SinkState::Idle);
  drop(session);
}

#[tokio::test(start_paused = true)]
async fn test_explicit_save_requires_session() {
  let h = harness(false);
  let (session, _) = EditingSession::start(h.sync.clone()).await;

  let err = session.save_project().await.unwrap_err();
  assert_eq!(err, SaveProjectError::AuthRequired);
  assert!(h.remote.projects.lock().unwrap().is_empty());

  h.session.sign_in(UserId::new("u-1"));
  let id = session.save_project().await.unwrap();

  let projects = h.remote.projects.lock().unwrap().clone();
  assert_eq!(projects.len(), 1);
  assert_eq!(projects[0].id, id);
  assert_eq!(projects[0].created_at, projects[0].updated_at);
}

#[tokio::test(start_paused = true)]
async fn test_explicit_save_failure_is_a_remote_persistence_failure() {
  let h = harness(true);
  *h.remote.fail.lock().unwrap() = true;
  let (session, _) = EditingSession::start(h.sync.clone()).await;

  match session.save_project().await {
    Err(SaveProjectError::Failed(f)) => assert_eq!(f.sink, Sink::Remote),
    other => panic!("unexpected result: {other:?}"),
  }
}

#[tokio::test(start_paused = true)]
async fn test_start_restores_saved_document_without_saving_it_again() {
  let mut saved = Song::default();
  saved.song_info.title = "guardada".into();
  let local = MemoryLocal::default();
  *local.preset.lock().unwrap() = Some(Ok(PersistedDocument::from_song(&saved, chrono::Utc::now())));

  let h = harness_with(local, MemoryRemote::default(), StaticSession::anonymous());
  let (session, outcome) = EditingSession::start(h.sync.clone()).await;

  assert_eq!(outcome, LoadOutcome::Restored);
  assert_eq!(session.song(), &saved);

  sleep(REMOTE + EPS).await;
  assert!(h.local.saves().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_corrupt_saved_document_keeps_default() {
  let local = MemoryLocal::default();
  *local.preset.lock().unwrap() = Some(Err("unexpected end of input".into()));

  let h = harness_with(local, MemoryRemote::default(), StaticSession::anonymous());
  let (session, outcome) = EditingSession::start(h.sync.clone()).await;

  assert!(matches!(outcome, LoadOutcome::Discarded(f) if f.sink == Sink::Local));
  let song = session.song();
  assert_eq!(song.strophes.len(), 1);
  assert_eq!(song.strophes[0].architecture(), Architecture::Prologue);
  assert!(song.song_info.title.is_empty());
}
