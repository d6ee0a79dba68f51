use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    channel::{MessageChannel, MessageRef},
    models::WeekStart,
};

#[derive(Clone)]
pub struct AppState {
    pub postgres: PgPool,
    pub channel: Arc<dyn MessageChannel>,
    pub sessions: SurveySessions,
}

// In-flight sessions are evicted after this long without completing.
pub const SESSION_TTL_HOURS: i64 = 6;

// Partially collected fields of the add-subscription dialog.
#[derive(Debug, Clone, Default)]
pub struct NewSubscriptionDraft {
    pub service_name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

#[derive(Debug, Clone)]
pub enum SessionKind {
    AwaitingRating {
        subscription_id: Uuid,
        week: WeekStart,
        // Survey message to re-render once the rating lands, so one
        // message can rate several subscriptions in sequence.
        survey_message: Option<MessageRef>,
    },
    AwaitingImportance {
        subscription_id: Uuid,
    },
    AddingSubscription(NewSubscriptionDraft),
}

#[derive(Debug, Clone)]
pub struct Session {
    pub kind: SessionKind,
    pub started_at: DateTime<Utc>,
}

// One conversational session per user; starting a new one replaces a stale
// one. Lives only in process memory; a restart drops in-flight sessions.
#[derive(Clone, Default)]
pub struct SurveySessions(Arc<Mutex<HashMap<i64, Session>>>);

impl SurveySessions {
    pub async fn begin(&self, user_id: i64, kind: SessionKind) {
        let session = Session {
            kind,
            started_at: Utc::now(),
        };

        if self.0.lock().await.insert(user_id, session).is_some() {
            tracing::debug!("Replaced pending session for user {}", user_id);
        }
    }

    pub async fn get(&self, user_id: i64) -> Option<Session> {
        self.0.lock().await.get(&user_id).cloned()
    }

    // Advances a dialog without touching its start time.
    pub async fn update(&self, user_id: i64, kind: SessionKind) {
        if let Some(session) = self.0.lock().await.get_mut(&user_id) {
            session.kind = kind;
        }
    }

    pub async fn clear(&self, user_id: i64) -> Option<Session> {
        self.0.lock().await.remove(&user_id)
    }

    pub async fn sweep_expired(&self, ttl: Duration) {
        let cutoff = Utc::now() - ttl;
        let mut sessions = self.0.lock().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.started_at > cutoff);

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} expired session(s)", evicted);
        }
    }
}
