use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Qualitative band for an account's engagement percentage
///
/// Thresholds: High at 50% and above, Medium at 15% and above,
/// Low below that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementTier {
    High,
    Medium,
    Low,
}

impl EngagementTier {
    pub fn for_percentage(engagement: Decimal) -> Self {
        if engagement >= dec!(50) {
            EngagementTier::High
        } else if engagement >= dec!(15) {
            EngagementTier::Medium
        } else {
            EngagementTier::Low
        }
    }
}
