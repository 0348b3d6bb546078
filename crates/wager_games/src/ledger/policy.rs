//! Tier-dependent rating adjustment.

use tracing::instrument;

use crate::Tier;

/// How a raw rating delta is scaled for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingPolicy {
    /// Delta applied as-is.
    Basic,
    /// Losses are divided by `multiplier` (integer division).
    Premium {
        /// Loss divisor.
        multiplier: u32,
    },
    /// Losses divided and gains multiplied by `multiplier`.
    PremiumPlus {
        /// Loss divisor and gain factor.
        multiplier: u32,
    },
}

impl RatingPolicy {
    /// Policy for an account tier. A zero multiplier is treated as 1.
    pub fn for_tier(tier: Tier, multiplier: u32) -> Self {
        let multiplier = multiplier.max(1);
        match tier {
            Tier::Basic => Self::Basic,
            Tier::Premium => Self::Premium { multiplier },
            Tier::PremiumPlus => Self::PremiumPlus { multiplier },
        }
    }

    /// Scales a raw delta according to the policy.
    pub fn scale(self, delta: i64) -> i64 {
        match self {
            Self::Basic => delta,
            Self::Premium { multiplier } => soften(delta, multiplier),
            Self::PremiumPlus { multiplier } if delta > 0 => {
                delta.saturating_mul(i64::from(multiplier))
            }
            Self::PremiumPlus { multiplier } => soften(delta, multiplier),
        }
    }
}

fn soften(delta: i64, multiplier: u32) -> i64 {
    if delta < 0 {
        let magnitude = delta.unsigned_abs() / u64::from(multiplier.max(1));
        i64::try_from(magnitude).map_or(i64::MIN, |m| -m)
    } else {
        delta
    }
}

/// Applies a delta to a rating under a policy.
///
/// A loss never takes the rating below `floor`, but the floor never raises a
/// rating either: a zero delta leaves `base` as is, and an account already
/// under the floor can only stay where it is.
#[instrument]
pub fn apply_delta(policy: RatingPolicy, base: u32, delta: i64, floor: u32) -> u32 {
    let scaled = policy.scale(delta);
    if scaled == 0 {
        return base;
    }
    let lower = if scaled < 0 { floor.min(base) } else { base };
    let raw = i64::from(base).saturating_add(scaled);
    let clamped = raw.clamp(i64::from(lower), i64::from(u32::MAX));
    u32::try_from(clamped).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREMIUM: RatingPolicy = RatingPolicy::Premium { multiplier: 2 };
    const PREMIUM_PLUS: RatingPolicy = RatingPolicy::PremiumPlus { multiplier: 2 };

    #[test]
    fn test_basic_applies_delta() {
        assert_eq!(apply_delta(RatingPolicy::Basic, 100, 10, 1), 110);
        assert_eq!(apply_delta(RatingPolicy::Basic, 100, -10, 1), 90);
    }

    #[test]
    fn test_floor_holds() {
        assert_eq!(apply_delta(RatingPolicy::Basic, 5, -10, 1), 1);
        assert_eq!(apply_delta(RatingPolicy::Basic, 5, -10, 0), 0);
    }

    #[test]
    fn test_premium_softens_losses_only() {
        assert_eq!(apply_delta(PREMIUM, 100, -10, 1), 95);
        assert_eq!(apply_delta(PREMIUM, 100, -7, 1), 97);
        assert_eq!(apply_delta(PREMIUM, 100, 10, 1), 110);
    }

    #[test]
    fn test_premium_plus_amplifies_gains() {
        assert_eq!(apply_delta(PREMIUM_PLUS, 100, 10, 1), 120);
        assert_eq!(apply_delta(PREMIUM_PLUS, 100, -10, 1), 95);
    }

    #[test]
    fn test_zero_multiplier_treated_as_one() {
        let policy = RatingPolicy::for_tier(Tier::Premium, 0);
        assert_eq!(policy, RatingPolicy::Premium { multiplier: 1 });
        assert_eq!(apply_delta(policy, 100, -10, 1), 90);
    }

    #[test]
    fn test_zero_delta_unchanged() {
        for policy in [RatingPolicy::Basic, PREMIUM, PREMIUM_PLUS] {
            assert_eq!(apply_delta(policy, 42, 0, 1), 42);
        }
    }

    #[test]
    fn test_large_multiplier_saturates() {
        let policy = RatingPolicy::PremiumPlus { multiplier: u32::MAX };
        assert_eq!(policy.scale(i64::from(u32::MAX)), i64::MAX);
        assert_eq!(apply_delta(policy, u32::MAX, i64::from(u32::MAX), 1), u32::MAX);
        assert_eq!(apply_delta(policy, 7, i64::MAX, 1), u32::MAX);
    }

    #[test]
    fn test_most_negative_delta_does_not_panic() {
        assert_eq!(RatingPolicy::Basic.scale(i64::MIN), i64::MIN);
        assert_eq!(PREMIUM.scale(i64::MIN), i64::MIN / 2);
        assert_eq!(apply_delta(PREMIUM_PLUS, 100, i64::MIN, 1), 1);
        assert_eq!(apply_delta(RatingPolicy::Basic, 100, i64::MIN, 0), 0);
    }

    #[test]
    fn test_floor_never_raises_rating() {
        assert_eq!(apply_delta(RatingPolicy::Basic, 0, 0, 1), 0);
        assert_eq!(apply_delta(PREMIUM_PLUS, 3, 0, 10), 3);
        // Already under the floor: a loss cannot push it lower or lift it.
        assert_eq!(apply_delta(RatingPolicy::Basic, 3, -5, 10), 3);
        // Gains from below the floor are applied as-is.
        assert_eq!(apply_delta(RatingPolicy::Basic, 3, 4, 10), 7);
    }
}
