//! Gravity timing, point awards and level thresholds.

/// Frames between automatic drops for levels `0..=29`.
const FRAMES_PER_DROP: [u8; 30] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, 5, 5, 5, 4, 4, 4, 3, 3, 3, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    1,
];

/// Duration of one frame in seconds.
pub const SECONDS_PER_FRAME: f64 = 1.0 / 60.0;

/// How long full rows stay highlighted before they are removed, in seconds.
pub const LINE_CLEAR_DELAY: f64 = 0.5;

/// Seconds between automatic drops at `level`.
///
/// Levels above 29 use the level 29 interval.
#[must_use]
pub fn drop_interval(level: usize) -> f64 {
    let level = level.min(FRAMES_PER_DROP.len() - 1);
    f64::from(FRAMES_PER_DROP[level]) * SECONDS_PER_FRAME
}

/// Points awarded for clearing `lines` rows at once at `level`.
///
/// | lines | points             |
/// |-------|--------------------|
/// | 1     | 40 × (level + 1)   |
/// | 2     | 100 × (level + 1)  |
/// | 3     | 300 × (level + 1)  |
/// | 4     | 1200 × (level + 1) |
///
/// Any other count scores nothing.
#[must_use]
pub fn points(level: usize, lines: usize) -> usize {
    let base = match lines {
        1 => 40,
        2 => 100,
        3 => 300,
        4 => 1200,
        _ => 0,
    };
    base * (level + 1)
}

/// Cumulative line count at which `level` advances to the next level.
///
/// The first threshold depends on the starting level; every later level needs
/// ten more lines.
#[must_use]
pub fn lines_for_next_level(start_level: usize, level: usize) -> usize {
    let first = usize::min(
        start_level * 10 + 10,
        usize::max(100, (start_level * 10).saturating_sub(50)),
    );
    first + level.saturating_sub(start_level) * 10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(level: usize) -> f64 {
        drop_interval(level) / SECONDS_PER_FRAME
    }

    #[test]
    fn test_drop_interval_table() {
        assert!((frames(0) - 48.0).abs() < 1e-9);
        assert!((frames(9) - 6.0).abs() < 1e-9);
        assert!((frames(29) - 1.0).abs() < 1e-9);
        assert!((drop_interval(0) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_drop_interval_clamps_above_29() {
        assert!((drop_interval(30) - drop_interval(29)).abs() < f64::EPSILON);
        assert!((drop_interval(1000) - SECONDS_PER_FRAME).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drop_interval_is_non_increasing() {
        for level in 1..40 {
            assert!(drop_interval(level) <= drop_interval(level - 1));
        }
    }

    #[test]
    fn test_points() {
        assert_eq!(points(0, 1), 40);
        assert_eq!(points(0, 4), 1200);
        assert_eq!(points(3, 2), 400);
        assert_eq!(points(9, 3), 3000);
        assert_eq!(points(5, 0), 0);
        assert_eq!(points(5, 5), 0);
    }

    #[test]
    fn test_lines_for_next_level() {
        assert_eq!(lines_for_next_level(0, 0), 10);
        assert_eq!(lines_for_next_level(0, 1), 20);
        assert_eq!(lines_for_next_level(5, 5), 60);
        assert_eq!(lines_for_next_level(5, 7), 80);
        // High starting levels are capped at 100 lines, then at start * 10 - 50.
        assert_eq!(lines_for_next_level(10, 10), 100);
        assert_eq!(lines_for_next_level(16, 16), 110);
        assert_eq!(lines_for_next_level(19, 20), 150);
    }
}
