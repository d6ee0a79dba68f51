use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Delivery error: {0}")]
    Delivery(#[from] teloxide::RequestError),
}

impl AppError {
    // Short notice shown in chat. Validation errors carry their own
    // re-prompt text; everything else collapses to a generic line so
    // internals never leak into the conversation.
    pub fn user_notice(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(_) => "That subscription no longer exists.".into(),
            AppError::Database(_) => "Storage is unavailable right now, please try again.".into(),
            AppError::Delivery(_) => "Could not deliver the message, please try again.".into(),
        }
    }
}
