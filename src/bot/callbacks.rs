use teloxide::{payloads::AnswerCallbackQuerySetters, prelude::*, types::CallbackQuery};
use uuid::Uuid;

use crate::{
    channel::MessageRef,
    db,
    errors::AppError,
    models::WeekStart,
    state::AppState,
    survey::engine,
};

pub async fn handle_callback(bot: Bot, q: CallbackQuery, state: AppState) -> ResponseResult<()> {
    let user_id = q.from.id.0 as i64;

    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    // Buttons on inaccessible messages cannot be followed up on.
    let Some(message) = q.message.as_ref().and_then(|m| m.regular_message()) else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };
    let origin = MessageRef {
        chat_id: message.chat.id.0,
        message_id: message.id.0,
    };

    let outcome = if let Some(payload) = data.strip_prefix("rate_") {
        rate(&state, user_id, payload, origin).await
    } else if data.starts_with("finish_survey_") {
        engine::finish_survey(&state, user_id, origin).await
    } else if let Some(payload) = data.strip_prefix("change_imp_") {
        change_importance(&state, user_id, payload, origin).await
    } else if let Some(payload) = data.strip_prefix("del_") {
        delete(&state, user_id, payload, origin).await
    } else {
        tracing::debug!("uncaught callback: {data}");
        Ok(())
    };

    match outcome {
        Ok(()) => {
            bot.answer_callback_query(q.id).await?;
        }
        Err(e) => {
            tracing::error!("Callback '{}' failed for user {}: {}", data, user_id, e);
            bot.answer_callback_query(q.id)
                .text(e.user_notice())
                .show_alert(true)
                .await?;
        }
    }

    Ok(())
}

async fn rate(
    state: &AppState,
    user_id: i64,
    payload: &str,
    origin: MessageRef,
) -> Result<(), AppError> {
    let (subscription_id, week) = parse_subscription_week(payload)?;
    engine::begin_rating(state, user_id, subscription_id, week, origin).await
}

async fn change_importance(
    state: &AppState,
    user_id: i64,
    payload: &str,
    origin: MessageRef,
) -> Result<(), AppError> {
    let subscription_id = parse_subscription_id(payload)?;
    engine::begin_importance_change(state, user_id, subscription_id, origin).await
}

async fn delete(
    state: &AppState,
    user_id: i64,
    payload: &str,
    origin: MessageRef,
) -> Result<(), AppError> {
    let subscription_id = parse_subscription_id(payload)?;
    db::subscription::delete::delete_subscription(subscription_id, state.postgres.clone()).await?;

    engine::deliver(
        state,
        user_id,
        Some(origin),
        "✅ Payment removed, along with its usage history.",
        None,
    )
    .await
}

fn parse_subscription_id(payload: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(payload)
        .map_err(|e| AppError::Validation(format!("Invalid subscription id '{}': {}", payload, e)))
}

// rate_ payloads carry "<subscription uuid>_<week start>".
fn parse_subscription_week(payload: &str) -> Result<(Uuid, WeekStart), AppError> {
    let (id_part, week_part) = payload
        .split_once('_')
        .ok_or_else(|| AppError::Validation(format!("Malformed callback payload '{}'", payload)))?;

    let subscription_id = parse_subscription_id(id_part)?;
    let week = WeekStart::parse(week_part)?;

    Ok((subscription_id, week))
}
