use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::form::FormKind;
use crate::services::submission::FormSession;

pub const DEFAULT_IDLE_TTL_SECS: i64 = 30 * 60;
pub const DEFAULT_MAX_OPEN_FORMS: usize = 10_000;

/// Bounds on the open-form table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Forms untouched for longer than this are dropped.
    pub idle_ttl: Duration,
    pub max_open: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::seconds(DEFAULT_IDLE_TTL_SECS),
            max_open: DEFAULT_MAX_OPEN_FORMS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("too many open forms (limit {0})")]
    Full(usize),
}

/// Form instances currently open in visitors' browsers, keyed by a random
/// hex id. Every instance owns its own state; nothing is shared between them.
///
/// Idle forms are evicted whenever a new one is opened and by `evict_idle`.
/// A form with a submission in flight is never evicted.
#[derive(Default)]
pub struct FormSessions {
    sessions: Mutex<HashMap<String, Arc<FormSession>>>,
    limits: SessionLimits,
}

impl FormSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            limits,
        }
    }

    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<FormSession>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mount a fresh, empty form and return its id.
    pub fn open(&self, kind: FormKind) -> Result<(String, Arc<FormSession>), SessionError> {
        let mut sessions = self.lock();
        evict_idle_locked(&mut sessions, self.limits.idle_ttl, Utc::now());

        if sessions.len() >= self.limits.max_open {
            warn!(
                "Refusing to open {} form: {} forms already open",
                kind,
                sessions.len()
            );
            return Err(SessionError::Full(self.limits.max_open));
        }

        let id = generate_session_id();
        let session = Arc::new(FormSession::new(kind));
        sessions.insert(id.clone(), Arc::clone(&session));
        info!("Opened {} form {}", kind, id);
        Ok((id, session))
    }

    pub fn get(&self, id: &str) -> Option<Arc<FormSession>> {
        self.lock().get(id).cloned()
    }

    /// Discard a form, e.g. when the visitor navigates away.
    pub fn close(&self, id: &str) -> bool {
        let removed = self.lock().remove(id).is_some();
        if removed {
            info!("Closed form {}", id);
        }
        removed
    }

    /// Drop forms idle for longer than the TTL. Returns how many went.
    pub fn evict_idle(&self) -> usize {
        self.evict_idle_at(Utc::now())
    }

    /// `evict_idle` measured against `now`.
    pub fn evict_idle_at(&self, now: DateTime<Utc>) -> usize {
        evict_idle_locked(&mut self.lock(), self.limits.idle_ttl, now)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

fn evict_idle_locked(
    sessions: &mut HashMap<String, Arc<FormSession>>,
    idle_ttl: Duration,
    now: DateTime<Utc>,
) -> usize {
    let before = sessions.len();
    sessions.retain(|_, session| {
        session.is_in_flight() || now.signed_duration_since(session.last_touched()) <= idle_ttl
    });

    let evicted = before - sessions.len();
    if evicted > 0 {
        info!("Evicted {} idle forms", evicted);
    }
    evicted
}

fn generate_session_id() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
