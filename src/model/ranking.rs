//! Weekly voice ranking tiers.

/// Minimum weekly hours for tiers 4, 3 and 2. Everyone else is tier 1.
const TIER_THRESHOLDS_HOURS: [(u8, i64); 3] = [(4, 36), (3, 20), (2, 10)];

/// Role names and colors created by `/config ranking`, lowest tier first.
pub const TIER_ROLES: [(&str, u32); 4] = [
    ("Tower Tourist", 0x979c9f),
    ("Herald of Destiny", 0x2ecc71),
    ("Guardian of the Threshold", 0x3498db),
    ("Master of the Reaches", 0xf1c40f),
];

/// Tier earned by a weekly voice total.
pub fn tier_for_seconds(seconds: i64) -> u8 {
    TIER_THRESHOLDS_HOURS
        .iter()
        .find(|(_, hours)| seconds >= hours * 3600)
        .map(|(tier, _)| *tier)
        .unwrap_or(1)
}
