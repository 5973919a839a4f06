pub mod entities;
pub mod events;
pub mod services;
pub mod value_objects;

// Re-export entity types
pub use entities::{Post, SocialAccount};

// Re-export events
pub use events::StoreEvent;

// Re-export services
pub use services::{AccountValidator, OverviewStats, PostDraft, ValidationError, normalize_posts, search};

// Re-export value objects
pub use value_objects::{AccountId, EngagementTier};
