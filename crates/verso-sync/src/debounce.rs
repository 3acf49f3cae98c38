//! Debounce con estado explícito.
//!
//! `Idle → PendingDebounce → Writing → Idle`, con `PendingDebounce → Idle`
//! al cancelar. Cada `schedule` reinicia la ventana; solo el último trabajo
//! programado llega a ejecutarse. Una escritura en curso nunca se aborta y
//! las escrituras de un mismo debouncer se serializan.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SinkState {
  Idle,
  PendingDebounce,
  Writing,
}

#[derive(Default)]
struct Inner {
  /// Temporizador armado: (ticket, tarea).
  pending: Option<(u64, JoinHandle<()>)>,
  writes_in_flight: usize,
  next_ticket: u64,
}

pub struct Debouncer {
  name: &'static str,
  window: Duration,
  runtime: Handle,
  inner: Arc<Mutex<Inner>>,
  write_gate: Arc<tokio::sync::Mutex<()>>,
}

impl Debouncer {
  pub fn new(name: &'static str, window: Duration, runtime: Handle) -> Self {
    Self {
      name,
      window,
      runtime,
      inner: Arc::new(Mutex::new(Inner::default())),
      write_gate: Arc::new(tokio::sync::Mutex::new(())),
    }
  }

  pub fn window(&self) -> Duration {
    self.window
  }

  /// Programa `job` para cuando pase la ventana sin otro `schedule`.
  /// Sustituye (sin ejecutarlo) cualquier trabajo pendiente.
  pub fn schedule<F, Fut>(&self, job: F)
  where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
  {
    let Ok(mut inner) = self.inner.lock() else {
      warn!(debouncer = self.name, "debouncer state poisoned; change not scheduled");
      return;
    };

    if let Some((_, previous)) = inner.pending.take() {
      previous.abort();
    }

    inner.next_ticket += 1;
    let ticket = inner.next_ticket;
    let shared = Arc::clone(&self.inner);
    let gate = Arc::clone(&self.write_gate);
    let window = self.window;
    let name = self.name;

    let handle = self.runtime.spawn(async move {
      tokio::time::sleep(window).await;

      {
        let Ok(mut inner) = shared.lock() else { return };
        // otro schedule o un cancel llegaron mientras dormíamos
        if !matches!(&inner.pending, Some((t, _)) if *t == ticket) {
          return;
        }
        inner.pending = None;
        inner.writes_in_flight += 1;
      }

      trace!(debouncer = name, ticket, "debounce window elapsed");
      {
        let _serial = gate.lock().await;
        job().await;
      }

      if let Ok(mut inner) = shared.lock() {
        inner.writes_in_flight -= 1;
      }
    });

    inner.pending = Some((ticket, handle));
    trace!(debouncer = self.name, ticket, "scheduled");
  }

  /// Descarta el trabajo pendiente, si lo hay. Idempotente. Devuelve `true`
  /// si había algo que cancelar.
  pub fn cancel(&self) -> bool {
    let Ok(mut inner) = self.inner.lock() else { return false };
    match inner.pending.take() {
      Some((ticket, handle)) => {
        handle.abort();
        trace!(debouncer = self.name, ticket, "canceled");
        true
      }
      None => false,
    }
  }

  pub fn state(&self) -> SinkState {
    let Ok(inner) = self.inner.lock() else { return SinkState::Idle };
    if inner.writes_in_flight > 0 {
      SinkState::Writing
    } else if inner.pending.is_some() {
      SinkState::PendingDebounce
    } else {
      SinkState::Idle
    }
  }
}

impl Drop for Debouncer {
  fn drop(&mut self) {
    self.cancel();
  }
}
