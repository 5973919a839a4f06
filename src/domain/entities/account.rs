use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AccountId, EngagementTier};

/// A single published post on a social account
///
/// Posts are owned wholesale by their account: edits replace the whole
/// post list, and the only in-place mutation is the view counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub title: String,
    pub description: String,
    /// Publication date (display order is list order, not date order)
    pub created_at: NaiveDate,
    pub views: u64,
}

impl Post {
    pub fn new(title: impl Into<String>, description: impl Into<String>, created_at: NaiveDate) -> Self {
        Post {
            title: title.into(),
            description: description.into(),
            created_at,
            views: 0,
        }
    }

    pub fn with_views(mut self, views: u64) -> Self {
        self.views = views;
        self
    }
}

/// A tracked social-media account and its posts
///
/// The id is generated by the caller before the account reaches the
/// store (see [`AccountId::random`]); the store matches on it but never
/// assigns one itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialAccount {
    pub id: AccountId,
    pub name: String,
    pub followers: u64,
    /// Engagement rate as a percentage in [0, 100]
    pub engagement: Decimal,
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl SocialAccount {
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        followers: u64,
        engagement: Decimal,
    ) -> Self {
        SocialAccount {
            id,
            name: name.into(),
            followers,
            engagement,
            posts: Vec::new(),
        }
    }

    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.posts = posts;
        self
    }

    /// Classify this account's engagement rate
    pub fn engagement_tier(&self) -> EngagementTier {
        EngagementTier::for_percentage(self.engagement)
    }

    /// Sum of view counts across all posts
    pub fn total_views(&self) -> u64 {
        self.posts.iter().map(|p| p.views).sum()
    }
}
