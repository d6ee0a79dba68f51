pub mod callbacks;
pub mod commands;
pub mod messages;

use teloxide::prelude::*;

use crate::state::AppState;

pub async fn run_dispatcher(bot: Bot, state: AppState) {
    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<commands::Command>()
                .endpoint(commands::handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(callbacks::handle_callback))
        .branch(Update::filter_message().endpoint(messages::handle_message));

    tracing::info!("Starting Telegram dispatcher");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
