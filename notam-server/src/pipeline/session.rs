//! Last-request-wins search sessions.
//!
//! A user may fire several searches before the first one returns. Each
//! search takes a token from its session's counter; when it finishes, its
//! result is only applied if no newer search has been issued since. Older
//! searches still run to completion, their results are just dropped.
//!
//! Searches run on their own task, so a caller that stops waiting (a client
//! hanging up) does not leave the session loading forever.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::FlightNumber;

use super::orchestrator::{Pipeline, PipelineResult};

/// Identifies one search within a session. Later searches get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// What happened to a search's result.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The result is now the session's visible result.
    Applied(Arc<PipelineResult>),
    /// A newer search was issued first; the result was discarded.
    Superseded,
}

/// What the session currently shows.
#[derive(Debug, Clone, Default)]
pub struct SessionView {
    /// A search has been issued whose result has not been applied yet.
    pub loading: bool,
    /// The most recent applied result.
    pub result: Option<Arc<PipelineResult>>,
}

#[derive(Debug)]
struct Settled {
    token: RequestToken,
    result: Arc<PipelineResult>,
}

/// One user's search state: a request counter and the latest result slot.
#[derive(Debug, Default)]
pub struct Session {
    issued: AtomicU64,
    latest: RwLock<Option<Settled>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, superseding any in flight.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` belongs to the most recently issued search.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.issued.load(Ordering::SeqCst) == token.0
    }

    /// Offer a finished search's result.
    ///
    /// Returns the applied result, or `None` if a newer search has been
    /// issued or already applied.
    pub async fn settle(
        &self,
        token: RequestToken,
        result: PipelineResult,
    ) -> Option<Arc<PipelineResult>> {
        let mut slot = self.latest.write().await;

        let newer_applied = slot.as_ref().is_some_and(|s| s.token >= token);
        if newer_applied || !self.is_current(token) {
            debug!(?token, flight = %result.flight, "discarding superseded result");
            return None;
        }

        let result = Arc::new(result);
        *slot = Some(Settled {
            token,
            result: Arc::clone(&result),
        });
        Some(result)
    }

    /// Run a search through the pipeline and apply its result if it is
    /// still the latest.
    ///
    /// The token is issued on first poll. The pipeline run and the settle
    /// happen on a spawned task, which finishes even if the returned future
    /// is dropped.
    pub async fn search(
        self: Arc<Self>,
        pipeline: &Pipeline,
        flight: &FlightNumber,
    ) -> SearchOutcome {
        let token = self.issue();
        let pipeline = pipeline.clone();
        let flight = flight.clone();

        let task = tokio::spawn(async move {
            let result = pipeline.run(&flight).await;
            match self.settle(token, result).await {
                Some(applied) => SearchOutcome::Applied(applied),
                None => SearchOutcome::Superseded,
            }
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                warn!(?token, error = %e, "search task cancelled");
                SearchOutcome::Superseded
            }
        }
    }

    /// Snapshot of what the session currently shows.
    pub async fn view(&self) -> SessionView {
        let slot = self.latest.read().await;
        let issued = self.issued.load(Ordering::SeqCst);
        let applied = slot.as_ref().map_or(0, |s| s.token.0);

        SessionView {
            loading: applied < issued,
            result: slot.as_ref().map(|s| Arc::clone(&s.result)),
        }
    }
}

/// Limits on the session registry.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// A session untouched for this long is forgotten.
    pub idle_ttl: Duration,

    /// Maximum number of sessions kept.
    pub max_sessions: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
        }
    }
}

/// Sessions keyed by client-chosen id.
///
/// Bounded: idle sessions expire and the least useful are evicted once the
/// cap is reached. A search already running keeps its own handle on the
/// session and still finishes.
#[derive(Clone)]
pub struct Sessions {
    inner: MokaCache<String, Arc<Session>>,
}

impl Sessions {
    pub fn new(config: &SessionConfig) -> Self {
        let inner = MokaCache::builder()
            .time_to_idle(config.idle_ttl)
            .max_capacity(config.max_sessions)
            .build();

        Self { inner }
    }

    /// Get a session, creating it on first use.
    pub async fn get_or_create(&self, id: &str) -> Arc<Session> {
        self.inner
            .get_with(id.to_string(), async { Arc::new(Session::new()) })
            .await
    }

    /// Get an existing session.
    pub async fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.inner.get(id).await
    }
}

impl Default for Sessions {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}
