//! Uniform random draws in `[0, 1)`.
//!
//! Everything random in readyship goes through [`RollSource`] so tests can
//! pin the sequence with [`ScriptedRolls`] and assert exact outcomes.

/// Source of uniform draws in `[0, 1)`.
pub trait RollSource {
    fn roll(&mut self) -> f64;

    /// Integer in `min..=max` drawn as `floor(roll * span) + min`.
    fn between(&mut self, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        let offset = (self.roll() * span as f64).floor() as u64;
        min + offset.min(span - 1)
    }
}

impl<R: rand::Rng + ?Sized> RollSource for R {
    fn roll(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRolls {
    /// Values outside `[0, 1)` are clamped into range.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// How many draws have been consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RollSource for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn scripted_rolls_wrap_around() {
        let mut rolls = ScriptedRolls::new([0.1, 0.9]);
        assert_eq!(rolls.roll(), 0.1);
        assert_eq!(rolls.roll(), 0.9);
        assert_eq!(rolls.roll(), 0.1);
        assert_eq!(rolls.consumed(), 3);
    }

    #[test]
    fn between_covers_both_ends() {
        assert_eq!(ScriptedRolls::new([0.0]).between(200, 999), 200);
        assert_eq!(ScriptedRolls::new([0.999_999]).between(200, 999), 999);
        assert_eq!(ScriptedRolls::new([0.5]).between(1, 3), 2);
        assert_eq!(ScriptedRolls::new([0.5]).between(7, 7), 7);
    }

    #[test]
    fn clamps_out_of_range_scripts() {
        let mut rolls = ScriptedRolls::new([1.5, -0.2]);
        assert!(rolls.roll() < 1.0);
        assert_eq!(rolls.roll(), 0.0);
    }

    #[test]
    fn seeded_rng_is_a_roll_source() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let roll = rng.roll();
            assert!((0.0..1.0).contains(&roll));
            let n = rng.between(80, 449);
            assert!((80..=449).contains(&n));
        }
    }
}
