use std::sync::Arc;

use matchtimer_core::{AppConfig, EventCatalog, MatchSession};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

/// Handle to the one running match, shared by the REPL and the ticker
pub type SessionHandle = Arc<Mutex<MatchSession>>;

#[derive(Default)]
pub struct BackgroundTasks {
    pub ticker: Option<JoinHandle<()>>,
    pub audio: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub fn abort_all(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
        if let Some(handle) = self.audio.take() {
            handle.abort();
        }
    }
}

/// Holds all shared state for the CLI application.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    pub catalog: Arc<EventCatalog>,
    pub session: SessionHandle,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

impl CliContext {
    pub fn new(config: AppConfig, catalog: EventCatalog, session: MatchSession) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            catalog: Arc::new(catalog),
            session: Arc::new(Mutex::new(session)),
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
        }
    }
}
