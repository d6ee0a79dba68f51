pub mod analysis;
pub mod bot;
pub mod channel;
pub mod db;
pub mod errors;
pub mod models;
pub mod scheduler;
pub mod state;
pub mod survey;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use teloxide::Bot;

use crate::{
    channel::telegram::TelegramChannel,
    state::{AppState, SurveySessions},
};

pub async fn start_bot() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let postgres = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres");

    if let Err(e) = db::init::init_db(&postgres).await {
        tracing::error!("Failed to initialize database schema: {}", e);
        panic!("Failed to initialize database schema: {}", e);
    }

    let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").expect("TELEGRAM_BOT_TOKEN must be set");
    let bot = Bot::new(bot_token);

    let state = AppState {
        postgres,
        channel: Arc::new(TelegramChannel::new(bot.clone())),
        sessions: SurveySessions::default(),
    };

    tokio::spawn(scheduler::run_weekly_scheduler(state.clone()));

    bot::run_dispatcher(bot, state).await;
}
