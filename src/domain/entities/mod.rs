mod account;

pub use account::{Post, SocialAccount};
