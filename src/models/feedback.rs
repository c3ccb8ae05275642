use serde::{Deserialize, Serialize};

/// A feedback entry as the feedback service returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub venue_id: Option<i64>,
    #[serde(default)]
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub rating: Option<u8>,
    /// Staff reply, once there is one.
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// The submit-feedback form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub venue_id: i64,
    pub title: String,
    pub content: String,
    pub rating: u8,
}
