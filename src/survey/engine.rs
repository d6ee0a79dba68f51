use uuid::Uuid;

use crate::{
    analysis::ROLLING_WINDOW_WEEKS,
    channel::{Choice, MessageRef},
    db,
    errors::AppError,
    models::{SubscriptionFilter, UnusedSubscription, WeekStart},
    state::{AppState, SessionKind},
};

// Send the weekly survey, or refresh an already-delivered survey message in
// place after a rating landed. Already-rated subscriptions show their
// score, so the same message can be worked through button by button.
pub async fn send_weekly_survey(
    state: &AppState,
    user_id: i64,
    refresh: Option<MessageRef>,
) -> Result<(), AppError> {
    let filter = SubscriptionFilter {
        exclude_utilities: true,
    };
    let subscriptions =
        db::subscription::get::list_subscriptions(user_id, filter, state.postgres.clone()).await?;

    if subscriptions.is_empty() {
        if let Some(target) = refresh {
            // Best effort, the survey message may already be gone.
            let _ = state
                .channel
                .edit(target, "You have no subscriptions to rate.", None)
                .await;
        } else {
            state
                .channel
                .send(
                    user_id,
                    "You have no subscriptions to rate yet. Add one with /add first.",
                    None,
                )
                .await?;
        }
        return Ok(());
    }

    let week = WeekStart::current();
    let rated =
        db::usage::get::rated_subscription_ids(user_id, week, state.postgres.clone()).await?;

    let mut choices: Vec<Vec<Choice>> = Vec::new();
    for sub in &subscriptions {
        let label = if rated.contains(&sub.id) {
            match db::usage::get::is_rated(sub.id, week, state.postgres.clone()).await? {
                Some(score) => format!(
                    "✅ {} ({:.2}/mo) — {}/10",
                    sub.service_name, sub.price, score
                ),
                None => format!("{} ({:.2}/mo)", sub.service_name, sub.price),
            }
        } else {
            format!("{} ({:.2}/mo)", sub.service_name, sub.price)
        };

        choices.push(vec![Choice::new(label, format!("rate_{}_{}", sub.id, week))]);
    }
    choices.push(vec![Choice::new(
        "✅ Finish survey",
        format!("finish_survey_{}", week),
    )]);

    deliver(state, user_id, refresh, &survey_text(week), Some(choices)).await
}

fn survey_text(week: WeekStart) -> String {
    format!(
        "📊 <b>Weekly usage survey</b>\n\n\
        Rate how actively you used each subscription this week (from {}):\n\n\
        1-2 — barely touched it\n\
        3-4 — used it rarely\n\
        5-6 — used it moderately\n\
        7-8 — used it often\n\
        9-10 — used it heavily\n\n\
        Pick a subscription to rate:",
        week
    )
}

// A survey button was pressed: remember what is being rated and turn the
// survey message into a rating prompt.
pub async fn begin_rating(
    state: &AppState,
    user_id: i64,
    subscription_id: Uuid,
    week: WeekStart,
    origin: MessageRef,
) -> Result<(), AppError> {
    let subscription =
        db::subscription::get::get_subscription(subscription_id, state.postgres.clone()).await?;

    state
        .sessions
        .begin(
            user_id,
            SessionKind::AwaitingRating {
                subscription_id,
                week,
                survey_message: Some(origin),
            },
        )
        .await;

    let prompt = format!(
        "How actively did you use <b>{}</b> this week?\n\nSend a number from 1 to 10:",
        html_escape::encode_text(&subscription.service_name)
    );

    deliver(state, user_id, Some(origin), &prompt, None).await
}

// Persist a valid rating, confirm it, and re-render the originating survey
// message so the next subscription can be rated from the same message.
pub async fn submit_rating(
    state: &AppState,
    user_id: i64,
    subscription_id: Uuid,
    week: WeekStart,
    survey_message: Option<MessageRef>,
    score: i32,
) -> Result<(), AppError> {
    let subscription =
        db::subscription::get::get_subscription(subscription_id, state.postgres.clone()).await?;

    db::usage::put::upsert_usage(subscription_id, week, score, state.postgres.clone()).await?;

    let average =
        db::usage::get::average_usage(subscription_id, ROLLING_WINDOW_WEEKS, state.postgres.clone())
            .await?;

    let mut confirmation = format!(
        "✅ Saved: <b>{}</b> — {}/10 this week.",
        html_escape::encode_text(&subscription.service_name),
        score
    );
    if let Some(average) = average {
        confirmation.push_str(&format!(" Rolling average: {:.1}/10.", average));
    }

    state.channel.send(user_id, &confirmation, None).await?;

    if let Some(origin) = survey_message {
        send_weekly_survey(state, user_id, Some(origin)).await?;
    }

    Ok(())
}

// Terminal display; already-saved ratings stay untouched.
pub async fn finish_survey(
    state: &AppState,
    user_id: i64,
    origin: MessageRef,
) -> Result<(), AppError> {
    state.sessions.clear(user_id).await;

    deliver(
        state,
        user_id,
        Some(origin),
        "✅ <b>Survey complete!</b>\n\n\
        All your ratings are saved. Check /advice for cost-efficiency recommendations.",
        None,
    )
    .await
}

pub async fn begin_importance_change(
    state: &AppState,
    user_id: i64,
    subscription_id: Uuid,
    origin: MessageRef,
) -> Result<(), AppError> {
    let subscription =
        db::subscription::get::get_subscription(subscription_id, state.postgres.clone()).await?;

    state
        .sessions
        .begin(user_id, SessionKind::AwaitingImportance { subscription_id })
        .await;

    let prompt = format!(
        "Current importance of <b>{}</b>: {}/10\n\nSend a new importance from 1 to 10:",
        html_escape::encode_text(&subscription.service_name),
        subscription.importance
    );

    deliver(state, user_id, Some(origin), &prompt, None).await
}

// Importance writes straight to the subscription, no averaging involved.
pub async fn submit_importance(
    state: &AppState,
    user_id: i64,
    subscription_id: Uuid,
    importance: i32,
) -> Result<(), AppError> {
    let subscription =
        db::subscription::patch::update_importance(subscription_id, importance, state.postgres.clone())
            .await?;

    state
        .channel
        .send(
            user_id,
            &format!(
                "✅ Importance of <b>{}</b> set to {}/10.",
                html_escape::encode_text(&subscription.service_name),
                importance
            ),
            None,
        )
        .await?;

    Ok(())
}

pub async fn notify_unused(
    state: &AppState,
    user_id: i64,
    unused: &[UnusedSubscription],
) -> Result<(), AppError> {
    if unused.is_empty() {
        return Ok(());
    }

    let mut text = String::from(
        "⚠️ <b>Unused subscriptions</b>\n\nThese have gone without use for a while:\n\n",
    );

    for sub in unused {
        let name = html_escape::encode_text(&sub.service_name);
        match sub.last_rated_week {
            Some(week) => text.push_str(&format!(
                "❌ <b>{}</b> ({:.2}/mo)\n   Last used {} week(s) ago (week of {})\n\n",
                name, sub.price, sub.weeks_unused, week
            )),
            None => text.push_str(&format!(
                "❌ <b>{}</b> ({:.2}/mo)\n   Never rated ({} week(s) since it was added)\n\n",
                name, sub.price, sub.weeks_unused
            )),
        }
    }

    text.push_str("💡 Consider cancelling these to save money.");

    state.channel.send(user_id, &text, None).await?;

    Ok(())
}

// Edit in place when a target is known, falling back to a fresh send when
// the edit fails (message too old or deleted).
pub(crate) async fn deliver(
    state: &AppState,
    user_id: i64,
    target: Option<MessageRef>,
    text: &str,
    choices: Option<Vec<Vec<Choice>>>,
) -> Result<(), AppError> {
    if let Some(target) = target {
        match state.channel.edit(target, text, choices.clone()).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::warn!("Failed to update message for user {}: {}", user_id, e);
            }
        }
    }

    state.channel.send(user_id, text, choices).await?;

    Ok(())
}
