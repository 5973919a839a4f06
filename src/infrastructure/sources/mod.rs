mod seed;

pub use seed::{SeedAccountSource, SeedSourceConfig, default_accounts};
