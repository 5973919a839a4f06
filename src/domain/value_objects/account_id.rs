use rand::Rng;
use serde::{Deserialize, Serialize};

/// Unique identifier for a social account
///
/// Ids are opaque strings generated by the caller before an account is
/// handed to the store. [`AccountId::random`] produces the canonical
/// form, a 16-digit numeric string; anything unique is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Generate a fresh random id (16 decimal digits)
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        let digits: String = (0..16).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect();
        AccountId(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        AccountId(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        AccountId(s.to_string())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_is_sixteen_digits() {
        let id = AccountId::random();
        assert_eq!(id.as_str().len(), 16);
        assert!(id.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_random_ids_differ() {
        // Collisions are possible in principle but vanishingly unlikely
        assert_ne!(AccountId::random(), AccountId::random());
    }

    #[test]
    fn test_serde_transparent() {
        let id = AccountId::from("1234");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""1234""#);
    }
}
