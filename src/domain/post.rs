use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::RssItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub url: String,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
    pub feed_id: Uuid,
}

impl Post {
    /// Build a post from a normalized feed item. Items without a link have
    /// no stable key and yield `None`.
    pub fn from_item(feed_id: Uuid, item: &RssItem) -> Option<Self> {
        let url = item.link.trim();
        if url.is_empty() {
            return None;
        }

        let now = Utc::now();
        Some(Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title: item.title.clone(),
            url: url.to_string(),
            description: item.description.clone(),
            published_at: parse_pub_date(&item.pub_date),
            feed_id,
        })
    }
}

/// RSS dates are RFC 2822; anything else is kept as unknown
fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
