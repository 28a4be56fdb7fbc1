//! Adaptive difficulty
//!
//! Hazard speed scales linearly with how far the score is from its starting
//! value, clamped to a fixed band.

/// Map a score onto a hazard speed multiplier.
///
/// `modifier = clamp(base + (score - base_score) / change_rate, min, max)`.
/// Callers guarantee `change_rate > 0` and `min <= max` (see `Tuning::validate`).
pub fn compute_modifier(
    score: i32,
    base_score: i32,
    base_modifier: f32,
    change_rate: f32,
    min_modifier: f32,
    max_modifier: f32,
) -> f32 {
    // i64 so extreme scores can't overflow the subtraction
    let delta = (i64::from(score) - i64::from(base_score)) as f32;
    let raw = base_modifier + delta / change_rate;
    raw.max(min_modifier).min(max_modifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn curve(score: i32) -> f32 {
        compute_modifier(score, 10, 1.2, 50.0, 1.0, 2.5)
    }

    #[test]
    fn test_base_score_gives_base_modifier() {
        assert!((curve(10) - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_linear_region() {
        // +25 points -> +0.5
        assert!((curve(35) - 1.7).abs() < 1e-5);
        // -5 points -> -0.1
        assert!((curve(5) - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_clamped_at_both_ends() {
        assert_eq!(curve(0), 1.0);
        assert_eq!(curve(1_000), 2.5);
        assert_eq!(curve(i32::MIN), 1.0);
        assert_eq!(curve(i32::MAX), 2.5);
    }

    proptest! {
        #[test]
        fn modifier_stays_in_band(score in any::<i32>()) {
            let m = curve(score);
            prop_assert!((1.0..=2.5).contains(&m));
        }

        #[test]
        fn modifier_is_monotonic(a in any::<i32>(), b in any::<i32>()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(curve(lo) <= curve(hi));
        }
    }
}
