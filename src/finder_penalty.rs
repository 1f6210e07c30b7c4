/// Tracks recent run lengths within one row or column, to detect the
/// finder-pattern lookalike `1011101` (with light runs at least as wide as
/// the dark core on both sides) used by penalty term N3.
pub struct FinderPenalty {
    pub qr_size: i32,
    pub run_history: [i32; 7],
}

impl FinderPenalty {
    pub fn new(size: i32) -> Self {
        Self {
            qr_size: size,
            run_history: [0i32; 7],
        }
    }

    /// Pushes the given run length to the front and drops the oldest value.
    pub fn add_history(&mut self, mut currentrunlength: i32) {
        if self.run_history[0] == 0 {
            currentrunlength += self.qr_size; // Add light border to initial run
        }
        let rh = &mut self.run_history;
        for i in (0..rh.len() - 1).rev() {
            rh[i + 1] = rh[i];
        }
        rh[0] = currentrunlength;
    }

    /// Can only be called immediately after a light run is added, and returns 0, 1, or 2.
    pub fn count_patterns(&self) -> i32 {
        let rh = &self.run_history;
        let n = rh[1];
        debug_assert!(n <= self.qr_size * 3);
        let core = n > 0 && rh[2] == n && rh[3] == n * 3 && rh[4] == n && rh[5] == n;
        i32::from(core && rh[0] >= n * 4 && rh[6] >= n)
            + i32::from(core && rh[6] >= n * 4 && rh[0] >= n)
    }

    /// Must be called once at the end of a row or column of modules.
    pub fn terminate_and_count(mut self, currentruncolor: bool, mut currentrunlength: i32) -> i32 {
        if currentruncolor {
            // Terminate dark run
            self.add_history(currentrunlength);
            currentrunlength = 0;
        }
        currentrunlength += self.qr_size; // Add light border to final run
        self.add_history(currentrunlength);
        self.count_patterns()
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn find_no_pattern_with_insufficient_history() {
        let fp = FinderPenalty::new(21);
        assert_eq!(0, fp.count_patterns());
    }

    #[test]
    fn detect_the_canonical_1_1_3_1_1_ratio_bracketed_by_wide_light_runs() {
        let mut fp = FinderPenalty::new(21);
        // Seed a 1:1:3:1:1 run history with light borders at least 4x the unit width.
        fp.run_history = [4, 1, 1, 3, 1, 1, 4];
        assert_eq!(2, fp.count_patterns());
    }
}
