use std::time::Duration;

use chrono::{Datelike, Local, Timelike, Weekday};
use tokio::time::sleep;

use crate::{
    analysis::UNUSED_WEEKS_THRESHOLD,
    db,
    errors::AppError,
    models::WeekStart,
    state::{AppState, SESSION_TTL_HOURS},
    survey::engine,
};

const TRIGGER_HOUR: u32 = 10;
const TRIGGER_WINDOW_MINUTES: u32 = 5;

// Single global loop. The wall clock opens a Monday-morning window; the
// persisted survey_runs row is what actually gates the fan-out, so a
// restart inside the window cannot fire the same week twice.
pub async fn run_weekly_scheduler(state: AppState) {
    tracing::info!("Weekly survey scheduler started");

    loop {
        state
            .sessions
            .sweep_expired(chrono::Duration::hours(SESSION_TTL_HOURS))
            .await;

        if let Err(e) = tick(&state).await {
            tracing::error!("Survey scheduler tick failed: {}", e);
        }

        sleep(Duration::from_secs(60)).await;
    }
}

async fn tick(state: &AppState) -> Result<(), AppError> {
    let now = Local::now();
    if now.weekday() != Weekday::Mon
        || now.hour() != TRIGGER_HOUR
        || now.minute() >= TRIGGER_WINDOW_MINUTES
    {
        return Ok(());
    }

    let week = WeekStart::current();
    if db::survey_run::get::survey_already_sent(week, state.postgres.clone()).await? {
        return Ok(());
    }

    let user_ids = db::subscription::get::distinct_user_ids(state.postgres.clone()).await?;

    for &user_id in &user_ids {
        // One user failing must not starve the rest of the fan-out.
        if let Err(e) = engine::send_weekly_survey(state, user_id, None).await {
            tracing::error!("Failed to send weekly survey to user {}: {}", user_id, e);
        }

        // Spread the sends out instead of bursting.
        sleep(Duration::from_secs(1)).await;
    }

    tracing::info!("Weekly surveys sent to {} user(s)", user_ids.len());

    db::survey_run::post::mark_survey_sent(week, state.postgres.clone()).await?;

    check_unused_subscriptions(state, &user_ids).await;
    tracing::info!("Unused subscription check finished");

    Ok(())
}

async fn check_unused_subscriptions(state: &AppState, user_ids: &[i64]) {
    for &user_id in user_ids {
        let flagged = match db::usage::get::unused_subscriptions(
            user_id,
            UNUSED_WEEKS_THRESHOLD,
            state.postgres.clone(),
        )
        .await
        {
            Ok(flagged) => flagged,
            Err(e) => {
                tracing::error!("Unused check failed for user {}: {}", user_id, e);
                continue;
            }
        };

        if flagged.is_empty() {
            continue;
        }

        if let Err(e) = engine::notify_unused(state, user_id, &flagged).await {
            tracing::error!(
                "Failed to notify user {} about unused subscriptions: {}",
                user_id,
                e
            );
        }
    }
}
