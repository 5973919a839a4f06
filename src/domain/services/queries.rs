use crate::domain::entities::SocialAccount;

/// Filter accounts by a case-insensitive name search
///
/// A blank query matches everything. List order is preserved.
pub fn search<'a>(accounts: &'a [SocialAccount], query: &str) -> Vec<&'a SocialAccount> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return accounts.iter().collect();
    }

    accounts
        .iter()
        .filter(|a| a.name.to_lowercase().contains(&needle))
        .collect()
}

/// Headline numbers shown above the account list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverviewStats {
    pub accounts: usize,
    pub total_followers: u64,
}

impl OverviewStats {
    /// Aggregate over any set of accounts (typically a search result)
    pub fn collect<'a>(accounts: impl IntoIterator<Item = &'a SocialAccount>) -> Self {
        let mut stats = OverviewStats::default();
        for account in accounts {
            stats.accounts += 1;
            stats.total_followers += account.followers;
        }
        stats
    }
}
