pub mod telegram;

use async_trait::async_trait;

use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct Choice {
    pub label: String,
    pub data: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

// Reference to a delivered message so it can be edited in place later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i32,
}

// The outbound seam between the engine and whatever chat transport carries
// the conversation. Components receive it at construction instead of
// reaching for a process-global bot handle.
#[async_trait]
pub trait MessageChannel: Send + Sync {
    async fn send(
        &self,
        user_id: i64,
        text: &str,
        choices: Option<Vec<Vec<Choice>>>,
    ) -> Result<MessageRef, AppError>;

    // Editing can fail when the message is too old or was deleted; callers
    // fall back to send.
    async fn edit(
        &self,
        target: MessageRef,
        text: &str,
        choices: Option<Vec<Vec<Choice>>>,
    ) -> Result<(), AppError>;
}
