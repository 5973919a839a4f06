mod account_id;
mod engagement;

pub use account_id::AccountId;
pub use engagement::EngagementTier;
