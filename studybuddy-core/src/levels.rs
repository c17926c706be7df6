use serde::Serialize;

/// Ascending XP thresholds with the level name and icon unlocked at each.
pub const LEVELS: [(i64, &str, &str); 5] = [
    (0, "Bronze", "🥉"),
    (150, "Silver", "🥈"),
    (400, "Gold", "🥇"),
    (800, "Platinum", "💠"),
    (1500, "Legend", "👑"),
];

/// User-facing level display derived from a raw XP total.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LevelInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub next_threshold: Option<i64>,
    pub progress: i64,
}

/// Map an XP total onto the level table.
///
/// The current level is the highest threshold at or below `xp`; `progress`
/// is the floored percentage toward the next threshold, clamped to [0, 100]
/// and saturated at 100 once the top level is reached.
pub fn level_for(xp: i64) -> LevelInfo {
    let xp = xp.max(0);

    let mut current = LEVELS[0];
    let mut next_threshold = None;
    for level in LEVELS {
        if xp >= level.0 {
            current = level;
        } else {
            next_threshold = Some(level.0);
            break;
        }
    }

    let progress = match next_threshold {
        None => 100,
        Some(next) => {
            // Thresholds ascend, but guard the span anyway so the division
            // can never hit zero.
            let span = (next - current.0).max(1);
            ((xp - current.0) * 100 / span).clamp(0, 100)
        }
    };

    LevelInfo {
        name: current.1,
        icon: current.2,
        next_threshold,
        progress,
    }
}

#[cfg(test)]
mod tests {
    use super::{LEVELS, level_for};

    #[test]
    fn starts_at_bronze_with_zero_progress() {
        let info = level_for(0);
        assert_eq!(info.name, "Bronze");
        assert_eq!(info.icon, "🥉");
        assert_eq!(info.next_threshold, Some(150));
        assert_eq!(info.progress, 0);
    }

    #[test]
    fn threshold_boundaries_flip_levels() {
        let below = level_for(149);
        assert_eq!(below.name, "Bronze");
        assert_eq!(below.progress, 99);

        let at = level_for(150);
        assert_eq!(at.name, "Silver");
        assert_eq!(at.next_threshold, Some(400));
        assert_eq!(at.progress, 0);
    }

    #[test]
    fn top_level_saturates() {
        for xp in [1500, 1501, 99_999] {
            let info = level_for(xp);
            assert_eq!(info.name, "Legend");
            assert_eq!(info.next_threshold, None);
            assert_eq!(info.progress, 100);
        }
    }

    #[test]
    fn progress_stays_within_bounds() {
        for xp in 0..=2000 {
            let info = level_for(xp);
            assert!((0..=100).contains(&info.progress), "xp={xp}");
        }
    }

    #[test]
    fn negative_xp_is_treated_as_zero() {
        assert_eq!(level_for(-40), level_for(0));
    }

    #[test]
    fn table_thresholds_ascend_from_zero() {
        assert_eq!(LEVELS[0].0, 0);
        for pair in LEVELS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }
}
