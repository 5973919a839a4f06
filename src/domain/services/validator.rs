use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Post, SocialAccount};

/// Validates account records against the dashboard's form rules
///
/// The store itself accepts anything (its mutations are total); this
/// runs on the submitting side, before an add or update is dispatched.
pub struct AccountValidator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field path the rule failed on, e.g. `posts[1].title`
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

const MIN_ENGAGEMENT: Decimal = dec!(0.1);
const MAX_ENGAGEMENT: Decimal = dec!(100);

impl AccountValidator {
    pub fn validate(account: &SocialAccount) -> Result<(), ValidationError> {
        if account.name.trim().is_empty() {
            return Err(ValidationError::new("name", "Name is required"));
        }

        if account.followers < 1 {
            return Err(ValidationError::new("followers", "Must be at least 1"));
        }

        if account.engagement < MIN_ENGAGEMENT {
            return Err(ValidationError::new("engagement", "Must be at least 0.1"));
        }
        if account.engagement > MAX_ENGAGEMENT {
            return Err(ValidationError::new("engagement", "Must be less than 100"));
        }

        for (index, post) in account.posts.iter().enumerate() {
            if post.title.trim().is_empty() {
                return Err(ValidationError::new(
                    format!("posts[{}].title", index),
                    "Title is required",
                ));
            }
            if post.description.trim().is_empty() {
                return Err(ValidationError::new(
                    format!("posts[{}].description", index),
                    "Description is required",
                ));
            }
        }

        Ok(())
    }
}

/// A post as it comes off an edit form, before normalization
///
/// Unlike [`Post`], the creation date may be absent; it defaults to the
/// supplied "today" when the draft is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
    #[serde(default)]
    pub views: u64,
}

/// Turn form drafts into the post list that gets saved
///
/// Drafts that are blank in both title and description are dropped;
/// kept drafts have their text trimmed and a missing date filled with
/// `today`. Order is preserved.
pub fn normalize_posts(drafts: Vec<PostDraft>, today: NaiveDate) -> Vec<Post> {
    drafts
        .into_iter()
        .filter(|d| !(d.title.trim().is_empty() && d.description.trim().is_empty()))
        .map(|d| Post {
            title: d.title.trim().to_string(),
            description: d.description.trim().to_string(),
            created_at: d.created_at.unwrap_or(today),
            views: d.views,
        })
        .collect()
}
