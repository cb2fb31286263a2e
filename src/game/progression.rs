//! Experience curves shared by workers, departments and the villain rank.
//!
//! Every curve has the same shape: reaching level `L` needs
//! `floor(base * (L - 1)^exponent)` accumulated points, so level 1 is free
//! and each further level costs super-linearly more.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelCurve {
    pub base: f64,
    pub exponent: f64,
}

pub const WORKER_CURVE: LevelCurve = LevelCurve {
    base: 25.0,
    exponent: 1.6,
};

pub const DEPARTMENT_CURVE: LevelCurve = LevelCurve {
    base: 20.0,
    exponent: 1.8,
};

/// Villain level is driven by completed missions rather than XP.
pub const VILLAIN_CURVE: LevelCurve = LevelCurve {
    base: 5.0,
    exponent: 1.5,
};

impl LevelCurve {
    /// Points required to reach `level`.
    pub fn xp_for_level(&self, level: u32) -> u64 {
        if level <= 1 {
            return 0;
        }
        (self.base * f64::from(level - 1).powf(self.exponent)).floor() as u64
    }

    /// Highest level whose requirement is covered by `xp`.
    pub fn level_for_xp(&self, xp: u64) -> u32 {
        let mut level = 1;
        while self.xp_for_level(level + 1) <= xp {
            level += 1;
        }
        level
    }
}

pub fn worker_level(xp: u64) -> u32 {
    WORKER_CURVE.level_for_xp(xp)
}

pub fn department_level(xp: u64) -> u32 {
    DEPARTMENT_CURVE.level_for_xp(xp)
}

pub fn villain_level(completed: u64) -> u32 {
    VILLAIN_CURVE.level_for_xp(completed)
}

pub fn villain_title(level: u32) -> &'static str {
    match level {
        0 | 1 => "Petty Crook",
        2 => "Aspiring Villain",
        3..=4 => "Scheming Mastermind",
        5..=7 => "Evil Overlord",
        8..=11 => "Supreme Villain",
        _ => "Dark Emperor",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_thresholds() {
        assert_eq!(DEPARTMENT_CURVE.xp_for_level(1), 0);
        assert_eq!(DEPARTMENT_CURVE.xp_for_level(2), 20);
        // 20 * 2^1.8 = 69.6
        assert_eq!(DEPARTMENT_CURVE.xp_for_level(3), 69);
    }

    #[test]
    fn level_is_monotonic_in_xp() {
        let mut last = 1;
        for xp in 0..5_000 {
            let level = worker_level(xp);
            assert!(level >= last);
            last = level;
        }
        assert!(last > 5);
    }

    #[test]
    fn level_boundary_is_inclusive() {
        let needed = WORKER_CURVE.xp_for_level(4);
        assert_eq!(worker_level(needed - 1), 3);
        assert_eq!(worker_level(needed), 4);
    }

    #[test]
    fn villain_level_from_completions() {
        assert_eq!(villain_level(0), 1);
        assert_eq!(villain_level(4), 1);
        assert_eq!(villain_level(5), 2);
        // 5 * 2^1.5 = 14.1
        assert_eq!(villain_level(14), 3);
    }

    #[test]
    fn titles_cover_all_levels() {
        assert_eq!(villain_title(1), "Petty Crook");
        assert_eq!(villain_title(6), "Evil Overlord");
        assert_eq!(villain_title(40), "Dark Emperor");
    }
}
