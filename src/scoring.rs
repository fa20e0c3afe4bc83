/// Points awarded for a perfect hold
pub const MAX_SCORE: i64 = 5000;

/// Score a hold of `frames_held` against `target_frames`.
///
/// The penalty is linear in the absolute frame error and is not clamped below,
/// so a hold more than twice the target scores negative. A zero target is
/// treated as one frame.
pub fn score(frames_held: u32, target_frames: u32, max_score: i64) -> i64 {
    let target = target_frames.max(1) as f64;
    let error = (target - frames_held as f64).abs();
    ((1.0 - error / target) * max_score as f64).round() as i64
}

/// Nominal best total for a game of `rounds` numbers
pub fn max_total(rounds: u8) -> i64 {
    rounds as i64 * MAX_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_hit_scores_max() {
        for target in [1, 60, 215, 300, 600] {
            assert_eq!(score(target, target, MAX_SCORE), MAX_SCORE);
            assert_eq!(score(target, target, 1000), 1000);
        }
    }

    #[test]
    fn zero_and_double_are_symmetric() {
        for target in [1, 7, 60, 215, 588] {
            assert_eq!(
                score(0, target, MAX_SCORE),
                score(2 * target, target, MAX_SCORE)
            );
            assert_eq!(score(0, target, MAX_SCORE), 0);
        }
    }

    #[test]
    fn log2_scenario() {
        assert_eq!(score(200, 215, MAX_SCORE), 4651);
    }

    #[test]
    fn far_off_hold_goes_negative() {
        assert_eq!(score(900, 300, MAX_SCORE), -5000);
    }

    #[test]
    fn zero_target_is_guarded() {
        assert_eq!(score(1, 0, MAX_SCORE), MAX_SCORE);
        assert_eq!(score(0, 0, MAX_SCORE), 0);
    }

    #[test]
    fn max_total_scales_with_rounds() {
        assert_eq!(max_total(1), 5000);
        assert_eq!(max_total(4), 20000);
    }
}
