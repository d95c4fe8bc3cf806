use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Thread titles are capped at the leading characters of the first message.
pub const TITLE_MAX_CHARS: usize = 50;

/// Derive a thread title from the first message of a conversation.
pub fn derive_title(text: &str) -> String {
    text.chars().take(TITLE_MAX_CHARS).collect()
}

/// One conversation: an owner-scoped, append-only message log.
///
/// Messages are embedded in the thread document so deletion removes the
/// thread and its messages in a single atomic operation. The pair
/// (user_id, thread_id) carries a unique compound index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: String,
    pub thread_id: String,
    pub title: String,
    pub messages: Vec<Message>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Thread {
    /// Build a new thread around its first message, deriving the title.
    pub fn new(user_id: impl Into<String>, thread_id: impl Into<String>, first: Message) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            user_id: user_id.into(),
            thread_id: thread_id.into(),
            title: derive_title(&first.content),
            messages: vec![first],
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Parse a role tag, accepting any casing ("User", "ASSISTANT", ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Lightweight listing projection: no message bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub thread_id: String,
    pub title: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}
