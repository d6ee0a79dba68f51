use teloxide::{
    prelude::*,
    types::{Message, ParseMode},
};
use uuid::Uuid;

use crate::{
    channel::MessageRef,
    db,
    errors::AppError,
    models::{WeekStart, subscription::{CATEGORIES, is_known_category}},
    state::{AppState, NewSubscriptionDraft, SessionKind},
    survey::{self, engine},
};

// Free-text replies only mean something while a dialog is open; which one
// is decided by the caller's session.
pub async fn handle_message(bot: Bot, msg: Message, state: AppState) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    let Some(text) = msg.text().map(str::to_owned) else {
        return Ok(());
    };

    let Some(session) = state.sessions.get(user_id).await else {
        bot.send_message(msg.chat.id, "I did not catch that. /help lists everything I can do.")
            .await?;
        return Ok(());
    };

    match session.kind {
        SessionKind::AwaitingRating {
            subscription_id,
            week,
            survey_message,
        } => {
            process_rating(
                bot,
                msg,
                state,
                user_id,
                subscription_id,
                week,
                survey_message,
                &text,
            )
            .await
        }
        SessionKind::AwaitingImportance { subscription_id } => {
            process_importance(bot, msg, state, user_id, subscription_id, &text).await
        }
        SessionKind::AddingSubscription(draft) => {
            process_add_step(bot, msg, state, user_id, draft, &text).await
        }
    }
}

async fn process_rating(
    bot: Bot,
    msg: Message,
    state: AppState,
    user_id: i64,
    subscription_id: Uuid,
    week: WeekStart,
    survey_message: Option<MessageRef>,
    text: &str,
) -> ResponseResult<()> {
    let score = match survey::parse_scale_value(text) {
        Ok(score) => score,
        Err(e) => {
            // Invalid input keeps the dialog open; the user just tries again.
            bot.send_message(msg.chat.id, e.user_notice()).await?;
            return Ok(());
        }
    };

    match engine::submit_rating(&state, user_id, subscription_id, week, survey_message, score).await
    {
        Ok(()) => {
            state.sessions.clear(user_id).await;
        }
        Err(e) => {
            tracing::error!("Failed to save rating for user {}: {}", user_id, e);
            if matches!(e, AppError::NotFound(_)) {
                state.sessions.clear(user_id).await;
            }
            bot.send_message(msg.chat.id, e.user_notice()).await?;
        }
    }

    Ok(())
}

async fn process_importance(
    bot: Bot,
    msg: Message,
    state: AppState,
    user_id: i64,
    subscription_id: Uuid,
    text: &str,
) -> ResponseResult<()> {
    let importance = match survey::parse_scale_value(text) {
        Ok(importance) => importance,
        Err(e) => {
            bot.send_message(msg.chat.id, e.user_notice()).await?;
            return Ok(());
        }
    };

    match engine::submit_importance(&state, user_id, subscription_id, importance).await {
        Ok(()) => {
            state.sessions.clear(user_id).await;
        }
        Err(e) => {
            tracing::error!("Failed to update importance for user {}: {}", user_id, e);
            if matches!(e, AppError::NotFound(_)) {
                state.sessions.clear(user_id).await;
            }
            bot.send_message(msg.chat.id, e.user_notice()).await?;
        }
    }

    Ok(())
}

// The /add dialog: name → monthly price → category → importance. Each step
// validates its own field and re-prompts without losing what was already
// collected.
async fn process_add_step(
    bot: Bot,
    msg: Message,
    state: AppState,
    user_id: i64,
    mut draft: NewSubscriptionDraft,
    text: &str,
) -> ResponseResult<()> {
    if draft.service_name.is_none() {
        let name = text.trim();
        if name.is_empty() {
            bot.send_message(msg.chat.id, "Please send the service name.")
                .await?;
            return Ok(());
        }

        draft.service_name = Some(name.to_string());
        state
            .sessions
            .update(user_id, SessionKind::AddingSubscription(draft))
            .await;

        bot.send_message(msg.chat.id, "How much do you pay per month?")
            .await?;
        return Ok(());
    }

    if draft.price.is_none() {
        let price = match text.trim().parse::<f64>() {
            Ok(price) if price >= 0.0 => price,
            _ => {
                bot.send_message(msg.chat.id, "Please send a non-negative number.")
                    .await?;
                return Ok(());
            }
        };

        draft.price = Some(price);
        state
            .sessions
            .update(user_id, SessionKind::AddingSubscription(draft))
            .await;

        bot.send_message(
            msg.chat.id,
            format!("Pick a category: {}", CATEGORIES.join(", ")),
        )
        .await?;
        return Ok(());
    }

    if draft.category.is_none() {
        let category = text.trim();
        if !is_known_category(category) {
            bot.send_message(
                msg.chat.id,
                format!("Please pick one of: {}", CATEGORIES.join(", ")),
            )
            .await?;
            return Ok(());
        }

        draft.category = Some(category.to_string());
        state
            .sessions
            .update(user_id, SessionKind::AddingSubscription(draft))
            .await;

        bot.send_message(
            msg.chat.id,
            "How important is it to you, from 1 (barely needed) to 10 (cannot live without it)?",
        )
        .await?;
        return Ok(());
    }

    let importance = match survey::parse_scale_value(text) {
        Ok(importance) => importance,
        Err(e) => {
            bot.send_message(msg.chat.id, e.user_notice()).await?;
            return Ok(());
        }
    };

    let name = draft.service_name.clone().unwrap_or_default();
    let price = draft.price.unwrap_or(0.0);
    let category = draft.category.clone().unwrap_or_default();

    match db::subscription::post::add_subscription(
        user_id,
        name,
        price,
        category,
        importance,
        state.postgres.clone(),
    )
    .await
    {
        Ok(subscription) => {
            state.sessions.clear(user_id).await;
            bot.send_message(
                msg.chat.id,
                format!(
                    "✅ <b>{}</b> saved. I will ask about it in the next weekly survey.",
                    html_escape::encode_text(&subscription.service_name)
                ),
            )
            .parse_mode(ParseMode::Html)
            .await?;
        }
        Err(e) => {
            tracing::error!("Failed to add subscription for user {}: {}", user_id, e);
            bot.send_message(msg.chat.id, e.user_notice()).await?;
        }
    }

    Ok(())
}
