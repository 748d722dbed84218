//! Loyalty boost: longer continuous staking earns a larger share of newly
//! accrued reward.
//!
//! | Continuous stake | Multiplier |
//! |------------------|------------|
//! | < 7 days         | 100 (1.0×) |
//! | ≥ 7 days         | 125        |
//! | ≥ 30 days        | 150        |
//! | ≥ 90 days        | 200 (2.0×) |
//!
//! Step function, no interpolation between tiers.

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Multiplier for positions with no stake or a streak shorter than every tier.
pub const BASE_MULTIPLIER: u32 = 100;

/// `(minimum streak in seconds, multiplier)`, highest tier first.
pub const TIERS: [(u64, u32); 3] = [
    (90 * SECONDS_PER_DAY, 200),
    (30 * SECONDS_PER_DAY, 150),
    (7 * SECONDS_PER_DAY, 125),
];

/// Boost multiplier for a position holding `amount` whose streak began at
/// `stake_start`, evaluated at `now`.
pub fn multiplier(amount: i128, stake_start: u64, now: u64) -> u32 {
    if amount == 0 {
        return BASE_MULTIPLIER;
    }

    let streak = now.saturating_sub(stake_start);
    TIERS
        .iter()
        .find(|(threshold, _)| streak >= *threshold)
        .map(|(_, boost)| *boost)
        .unwrap_or(BASE_MULTIPLIER)
}
