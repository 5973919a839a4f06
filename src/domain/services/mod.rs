mod queries;
mod validator;

pub use queries::{OverviewStats, search};
pub use validator::{AccountValidator, PostDraft, ValidationError, normalize_posts};
