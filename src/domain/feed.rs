use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl Feed {
    pub fn new(name: String, url: String, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            url,
            user_id,
            created_at: now,
            updated_at: now,
            last_fetched_at: None,
        }
    }
}

/// A feed row joined with the name of the user who registered it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedWithOwner {
    pub name: String,
    pub url: String,
    pub user_name: String,
}
