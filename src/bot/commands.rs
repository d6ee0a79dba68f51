use teloxide::{
    prelude::*,
    types::{Message, ParseMode},
    utils::command::BotCommands,
};

use crate::{
    analysis::scorer,
    channel::Choice,
    db,
    models::{SubscriptionFilter, Tier},
    state::{AppState, NewSubscriptionDraft, SessionKind},
    survey::engine,
};

#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "start tracking your recurring payments")]
    Start,
    #[command(description = "how this bot works")]
    Help,
    #[command(description = "add a recurring payment")]
    Add,
    #[command(description = "list your payments")]
    List,
    #[command(description = "monthly and yearly totals")]
    Stats,
    #[command(description = "cost-efficiency recommendations")]
    Advice,
    #[command(description = "rate this week's usage")]
    Survey,
    #[command(description = "change a payment's importance")]
    Importance,
    #[command(description = "delete a payment")]
    Delete,
    #[command(description = "cancel the current dialog")]
    Cancel,
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: AppState,
) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    match cmd {
        Command::Start => handle_start(bot, msg).await,
        Command::Help => handle_help(bot, msg).await,
        Command::Add => handle_add(bot, msg, state, user_id).await,
        Command::List => handle_list(bot, msg, state, user_id).await,
        Command::Stats => handle_stats(bot, msg, state, user_id).await,
        Command::Advice => handle_advice(bot, msg, state, user_id).await,
        Command::Survey => handle_survey(bot, msg, state, user_id).await,
        Command::Importance => handle_importance(bot, msg, state, user_id).await,
        Command::Delete => handle_delete(bot, msg, state, user_id).await,
        Command::Cancel => handle_cancel(bot, msg, state, user_id).await,
    }
}

async fn handle_start(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(
        msg.chat.id,
        "Hi! I track your recurring payments and tell you which ones are not worth \
        their price.\n\nUse /add to register a payment and /help to see everything I can do.",
    )
    .await?;

    Ok(())
}

async fn handle_help(bot: Bot, msg: Message) -> ResponseResult<()> {
    let help_text = "<b>How this bot works:</b>\n\n\
        1️⃣ <b>Add:</b> /add asks for a name, monthly price, category and your \
        personal importance score (1 to 10).\n\n\
        2️⃣ <b>Survey:</b> every Monday I ask how actively you used each \
        subscription that week (1 to 10). /survey runs it any time.\n\n\
        3️⃣ <b>Advice:</b> from your scores I compute the cost of one \
        'satisfaction unit'. Expensive services you barely use get flagged — \
        see /advice.\n\n\
        Also: /list, /stats, /importance, /delete, /cancel.";

    bot.send_message(msg.chat.id, help_text)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

async fn handle_add(bot: Bot, msg: Message, state: AppState, user_id: i64) -> ResponseResult<()> {
    state
        .sessions
        .begin(
            user_id,
            SessionKind::AddingSubscription(NewSubscriptionDraft::default()),
        )
        .await;

    bot.send_message(msg.chat.id, "What is the service called? (e.g. Netflix)")
        .await?;

    Ok(())
}

async fn handle_list(bot: Bot, msg: Message, state: AppState, user_id: i64) -> ResponseResult<()> {
    let subs = match db::subscription::get::list_subscriptions(
        user_id,
        SubscriptionFilter::default(),
        state.postgres.clone(),
    )
    .await
    {
        Ok(subs) => subs,
        Err(e) => {
            tracing::error!("Failed to list subscriptions for user {}: {}", user_id, e);
            bot.send_message(msg.chat.id, e.user_notice()).await?;
            return Ok(());
        }
    };

    if subs.is_empty() {
        bot.send_message(msg.chat.id, "You have no subscriptions yet. Use /add to add one.")
            .await?;
        return Ok(());
    }

    let mut response = "<b>Your subscriptions:</b>\n\n".to_string();

    for sub in &subs {
        response.push_str(&format!(
            "🔹 <b>{}</b> | {:.2}/mo\n   Category: {} | Importance: {}/10\n\n",
            html_escape::encode_text(&sub.service_name),
            sub.price,
            sub.category,
            sub.importance
        ));
    }

    bot.send_message(msg.chat.id, response)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

async fn handle_stats(bot: Bot, msg: Message, state: AppState, user_id: i64) -> ResponseResult<()> {
    let subs = match db::subscription::get::list_subscriptions(
        user_id,
        SubscriptionFilter::default(),
        state.postgres.clone(),
    )
    .await
    {
        Ok(subs) => subs,
        Err(e) => {
            tracing::error!("Failed to fetch stats for user {}: {}", user_id, e);
            bot.send_message(msg.chat.id, e.user_notice()).await?;
            return Ok(());
        }
    };

    if subs.is_empty() {
        bot.send_message(msg.chat.id, "Add some data first with /add.")
            .await?;
        return Ok(());
    }

    let (monthly, yearly) = scorer::monthly_forecast(&subs);

    bot.send_message(
        msg.chat.id,
        format!(
            "💰 <b>Spending summary</b>\nPer month: {:.2}\nPer year: {:.2}",
            monthly, yearly
        ),
    )
    .parse_mode(ParseMode::Html)
    .await?;

    Ok(())
}

async fn handle_advice(bot: Bot, msg: Message, state: AppState, user_id: i64) -> ResponseResult<()> {
    let subs = match db::subscription::get::list_subscriptions(
        user_id,
        SubscriptionFilter::default(),
        state.postgres.clone(),
    )
    .await
    {
        Ok(subs) => subs,
        Err(e) => {
            tracing::error!("Failed to analyze subscriptions for user {}: {}", user_id, e);
            bot.send_message(msg.chat.id, e.user_notice()).await?;
            return Ok(());
        }
    };

    if subs.is_empty() {
        bot.send_message(msg.chat.id, "Nothing to analyze yet. Use /add first.")
            .await?;
        return Ok(());
    }

    let report = scorer::analyze(&subs);

    let mut lines = String::new();
    for rec in &report.recommendations {
        let name = html_escape::encode_text(&rec.service_name);
        match rec.tier {
            // Healthy subscriptions stay out of the report.
            Tier::Optimal => {}
            Tier::NoData => lines.push_str(&format!(
                "❓ <b>{}</b>: no usage data yet — run /survey to rate it.\n\n",
                name
            )),
            Tier::Moderate => lines.push_str(&format!(
                "⚠️ <b>{}</b>: {:.1} per satisfaction unit. Worth a cheaper plan?\n\n",
                name,
                rec.cost_per_unit.unwrap_or_default()
            )),
            Tier::High => lines.push_str(&format!(
                "🔻 <b>{}</b>: {:.1} per satisfaction unit — poor value, think about cancelling.\n\n",
                name,
                rec.cost_per_unit.unwrap_or_default()
            )),
            Tier::Critical => lines.push_str(&format!(
                "❌ <b>{}</b>: {:.1} per satisfaction unit — you barely use it. Cancel it.\n\n",
                name,
                rec.cost_per_unit.unwrap_or_default()
            )),
        }
    }

    if lines.is_empty() {
        bot.send_message(msg.chat.id, "✅ Your spending looks optimal!")
            .await?;
        return Ok(());
    }

    let mut response = format!("🤖 <b>Efficiency analysis:</b>\n\n{}", lines);
    if report.total_waste > 0.0 {
        response.push_str(&format!(
            "💸 Potential savings: <b>{:.2}/mo</b>",
            report.total_waste
        ));
    }

    bot.send_message(msg.chat.id, response)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

async fn handle_survey(bot: Bot, msg: Message, state: AppState, user_id: i64) -> ResponseResult<()> {
    if let Err(e) = engine::send_weekly_survey(&state, user_id, None).await {
        tracing::error!("Failed to start survey for user {}: {}", user_id, e);
        bot.send_message(msg.chat.id, e.user_notice()).await?;
    }

    Ok(())
}

async fn handle_importance(
    bot: Bot,
    msg: Message,
    state: AppState,
    user_id: i64,
) -> ResponseResult<()> {
    let subs = match db::subscription::get::list_subscriptions(
        user_id,
        SubscriptionFilter::default(),
        state.postgres.clone(),
    )
    .await
    {
        Ok(subs) => subs,
        Err(e) => {
            tracing::error!("Failed to list subscriptions for user {}: {}", user_id, e);
            bot.send_message(msg.chat.id, e.user_notice()).await?;
            return Ok(());
        }
    };

    if subs.is_empty() {
        bot.send_message(msg.chat.id, "You have no subscriptions yet.")
            .await?;
        return Ok(());
    }

    let choices: Vec<Vec<Choice>> = subs
        .iter()
        .map(|sub| {
            vec![Choice::new(
                format!(
                    "{} ({:.2}/mo) — importance: {}/10",
                    sub.service_name, sub.price, sub.importance
                ),
                format!("change_imp_{}", sub.id),
            )]
        })
        .collect();

    if let Err(e) = state
        .channel
        .send(user_id, "Pick a subscription to change:", Some(choices))
        .await
    {
        tracing::error!("Failed to send importance menu to user {}: {}", user_id, e);
        bot.send_message(msg.chat.id, e.user_notice()).await?;
    }

    Ok(())
}

async fn handle_delete(bot: Bot, msg: Message, state: AppState, user_id: i64) -> ResponseResult<()> {
    let subs = match db::subscription::get::list_subscriptions(
        user_id,
        SubscriptionFilter::default(),
        state.postgres.clone(),
    )
    .await
    {
        Ok(subs) => subs,
        Err(e) => {
            tracing::error!("Failed to list subscriptions for user {}: {}", user_id, e);
            bot.send_message(msg.chat.id, e.user_notice()).await?;
            return Ok(());
        }
    };

    if subs.is_empty() {
        bot.send_message(msg.chat.id, "You have no subscriptions yet.")
            .await?;
        return Ok(());
    }

    let choices: Vec<Vec<Choice>> = subs
        .iter()
        .map(|sub| {
            vec![Choice::new(
                format!("❌ {} ({:.2}/mo)", sub.service_name, sub.price),
                format!("del_{}", sub.id),
            )]
        })
        .collect();

    if let Err(e) = state
        .channel
        .send(user_id, "Pick a subscription to delete:", Some(choices))
        .await
    {
        tracing::error!("Failed to send delete menu to user {}: {}", user_id, e);
        bot.send_message(msg.chat.id, e.user_notice()).await?;
    }

    Ok(())
}

async fn handle_cancel(bot: Bot, msg: Message, state: AppState, user_id: i64) -> ResponseResult<()> {
    let cleared = state.sessions.clear(user_id).await;

    let reply = if cleared.is_some() {
        "Okay, cancelled."
    } else {
        "Nothing to cancel."
    };
    bot.send_message(msg.chat.id, reply).await?;

    Ok(())
}
