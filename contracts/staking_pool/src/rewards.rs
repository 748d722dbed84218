use soroban_sdk::{Env, I256};

/// Fixed-point scaling factor for the accumulator.
///
/// The accumulator stores reward-per-staked-unit multiplied by this constant
/// so sub-unit accrual survives integer division.
pub const SCALE: i128 = 1_000_000_000_000_000_000;

/// Denominator of boost multipliers (`100` = 1.0×).
pub const PERCENT: i128 = 100;

// ── Core reward engine ──────────────────────────────────────────────────────

/// Fold `elapsed` seconds of emission into the accumulator.
///
/// ```text
/// Δacc = reward_rate × elapsed × SCALE / total_staked
/// acc' = acc + Δacc
/// ```
///
/// An empty pool returns `stored` unchanged: the elapsed time is dropped and
/// never credited to anyone later. Floor division; the remainder is lost.
///
/// The product is formed in 256 bits, which cannot overflow for any i128 rate
/// and u64 interval; `None` means the result does not fit back into i128.
pub fn accumulate(
    env: &Env,
    stored: i128,
    reward_rate: i128,
    elapsed: u64,
    total_staked: i128,
) -> Option<i128> {
    if total_staked <= 0 {
        return Some(stored);
    }

    let delta = I256::from_i128(env, reward_rate)
        .mul(&I256::from_i128(env, i128::from(elapsed)))
        .mul(&I256::from_i128(env, SCALE))
        .div(&I256::from_i128(env, total_staked))
        .to_i128()?;

    stored.checked_add(delta)
}

/// Reward owed to a position at accumulator value `current`.
///
/// ```text
/// marginal = amount × (current − baseline) / SCALE
/// earned   = pending + marginal × multiplier / 100
/// ```
///
/// The whole marginal delta is boosted at `multiplier`, whatever tier the
/// position was in when the delta accrued. When `current <= baseline`
/// nothing new has accrued and `pending` is returned as-is.
///
/// `amount × (current − baseline)` is formed in 256 bits; `None` means the
/// narrowed marginal or the boosted total does not fit in i128.
pub fn earned(
    env: &Env,
    amount: i128,
    current: i128,
    baseline: i128,
    pending: i128,
    multiplier: u32,
) -> Option<i128> {
    if current <= baseline {
        return Some(pending);
    }

    let marginal = I256::from_i128(env, amount)
        .mul(&I256::from_i128(env, current.checked_sub(baseline)?))
        .div(&I256::from_i128(env, SCALE))
        .to_i128()?;
    let boosted = marginal.checked_mul(i128::from(multiplier))? / PERCENT;

    pending.checked_add(boosted)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
