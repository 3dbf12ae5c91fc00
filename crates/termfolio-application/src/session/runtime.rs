//! Actor that owns one terminal session.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use termfolio_core::command::{CommandRegistry, Page};
use termfolio_core::error::{FolioError, Result};
use termfolio_core::session::{ClearMode, Effect, Event, Interpreter, Session, Timings};
use termfolio_core::state::{PersistedState, StateRepository};

use super::scheduler::Scheduler;

/// What the UI hears back from a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// The session state after an event.
    Changed(Session),
    /// Leave the page. The UI tears this runtime down and starts a new one.
    Navigate(Page),
    /// Open a URL externally.
    OpenExternal(String),
    /// The actor stopped and its queued state writes are done.
    Closed,
}

#[derive(Debug, Clone, Copy)]
pub struct RuntimeSettings {
    pub registry: &'static CommandRegistry,
    pub timings: Timings,
    pub clear_mode: ClearMode,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            registry: CommandRegistry::builtin(),
            timings: Timings::default(),
            clear_mode: ClearMode::default(),
        }
    }
}

/// Sending side of a running session.
#[derive(Clone)]
pub struct SessionHandle {
    id: Uuid,
    events: UnboundedSender<Event>,
    token: CancellationToken,
    actor: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SessionHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn send(&self, event: Event) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(FolioError::internal("session is shut down"));
        }
        self.events
            .send(event)
            .map_err(|_| FolioError::internal("session actor has stopped"))
    }

    /// Stops the actor, cancels every pending timer and waits until the
    /// queued state writes have reached the repository.
    ///
    /// Only the first caller waits; later calls return once the token is
    /// cancelled.
    pub async fn shutdown(&self) {
        self.token.cancel();
        let actor = self.actor.lock().await.take();
        if let Some(actor) = actor {
            if let Err(e) = actor.await {
                tracing::warn!("[Session] Actor task failed: {}", e);
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled() || self.events.is_closed()
    }
}

pub struct SessionRuntime;

impl SessionRuntime {
    /// Restores persisted state and spawns the session actor for `page`.
    ///
    /// The first update is always the initial `Changed` snapshot.
    pub async fn start(
        page: Page,
        repository: Arc<dyn StateRepository>,
        settings: RuntimeSettings,
    ) -> (SessionHandle, UnboundedReceiver<SessionUpdate>) {
        let id = Uuid::new_v4();
        let span = tracing::info_span!("session", id = %id, page = %page);

        let persisted = match repository.load_state().instrument(span.clone()).await {
            Ok(state) => state,
            Err(e) => {
                span.in_scope(|| {
                    tracing::warn!("[Session] Failed to restore state, using defaults: {}", e)
                });
                PersistedState::default()
            }
        };
        let session = Session::new(page, persisted);

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        let _ = update_tx.send(SessionUpdate::Changed(session.clone()));

        let actor = SessionActor {
            session,
            interpreter: Interpreter::new(settings.registry)
                .with_timings(settings.timings)
                .with_clear_mode(settings.clear_mode),
            scheduler: Scheduler::new(token.clone(), event_tx.clone()),
            persister: spawn_persister(repository, span.clone()),
            updates: update_tx,
        };
        let actor = tokio::spawn(actor.run(event_rx, token.clone()).instrument(span));

        let handle = SessionHandle {
            id,
            events: event_tx,
            token,
            actor: Arc::new(Mutex::new(Some(actor))),
        };
        (handle, update_rx)
    }
}

struct SessionActor {
    session: Session,
    interpreter: Interpreter<'static>,
    scheduler: Scheduler,
    persister: Persister,
    updates: UnboundedSender<SessionUpdate>,
}

impl SessionActor {
    async fn run(mut self, mut events: UnboundedReceiver<Event>, token: CancellationToken) {
        tracing::debug!("[Session] Started");
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                event = events.recv() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
            }
        }
        self.scheduler.cancel_all();
        self.persister.flush().await;
        let _ = self.updates.send(SessionUpdate::Closed);
        tracing::debug!("[Session] Closed");
    }

    fn handle(&mut self, event: Event) {
        tracing::trace!("[Session] Event {:?}", event);
        let transition = self.interpreter.apply(self.session.clone(), event);
        self.session = transition.session;
        let _ = self
            .updates
            .send(SessionUpdate::Changed(self.session.clone()));

        for effect in transition.effects {
            match effect {
                Effect::Persist(state) => {
                    if self.persister.writes.send(state).is_err() {
                        tracing::warn!("[Session] Persistence task is gone, dropping write");
                    }
                }
                Effect::Schedule { delay, event } => self.scheduler.schedule(delay, event),
                Effect::Navigate(page) => {
                    tracing::info!("[Session] Navigating to {}", page);
                    let _ = self.updates.send(SessionUpdate::Navigate(page));
                }
                Effect::OpenExternal(url) => {
                    let _ = self.updates.send(SessionUpdate::OpenExternal(url));
                }
            }
        }
    }
}

/// Writes persisted state in submission order, off the actor's path.
struct Persister {
    writes: UnboundedSender<PersistedState>,
    task: JoinHandle<()>,
}

impl Persister {
    /// Closes the queue and waits for the remaining writes.
    async fn flush(self) {
        let Persister { writes, task } = self;
        drop(writes);
        if let Err(e) = task.await {
            tracing::warn!("[Session] Persistence task failed: {}", e);
        }
    }
}

fn spawn_persister(repository: Arc<dyn StateRepository>, span: tracing::Span) -> Persister {
    let (writes, mut rx) = mpsc::unbounded_channel::<PersistedState>();
    let task = tokio::spawn(
        async move {
            while let Some(state) = rx.recv().await {
                if let Err(e) = repository.save_state(&state).await {
                    tracing::warn!("[Session] Failed to persist state: {}", e);
                }
            }
        }
        .instrument(span),
    );
    Persister { writes, task }
}
