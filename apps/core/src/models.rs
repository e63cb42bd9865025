use serde::{Deserialize, Serialize};

use crate::brain::{FunnelStage, Intent};

/// Role of a message author within a session.
///
/// Unknown role strings deserialize to [`Role::Other`] so that a session
/// containing tool or function messages still parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    #[serde(other)]
    Other,
}

/// A single message within a chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender (e.g., "user", "assistant").
    pub role: Role,
    /// The text content of the message.
    pub content: String,
}

/// One conversation as read from the input dump. Immutable once parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The unique identifier for the session.
    pub id: String,
    /// The ordered messages of the conversation.
    pub messages: Vec<ChatMessage>,
}

impl SessionRecord {
    /// Number of user-authored messages in the session.
    pub fn user_message_count(&self) -> u64 {
        self.messages
            .iter()
            .filter(|m| m.role == Role::User)
            .count() as u64
    }
}

/// A fully classified user query, created once per sampled message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedQuery {
    /// The ID of the session this query belongs to.
    pub session_id: String,
    /// The raw user message text.
    pub query: String,
    /// Classified intent category.
    pub intent: Intent,
    /// Derived customer-journey funnel stage.
    pub funnel_stage: FunnelStage,
    /// Canonical brand name found in the query, or "none".
    pub brand_mentioned: String,
    /// Whether the query reads as a support/troubleshooting request.
    pub is_support: bool,
    /// Total number of messages in the originating session.
    pub session_length: u64,
    /// Number of user messages in the originating session.
    pub num_user_messages: u64,
}
