//! The adaptive temperature / population-size schedule.

use super::config::SearchConfig;
use crate::problem::round_to;

/// Decimal places temperature is kept at, so repeated steps stay exact.
const TEMPERATURE_DECIMALS: i32 = 3;

/// Tracks and retunes the two exploration knobs of a run: the oracle
/// temperature and the working population size.
///
/// Two independent forces act on the temperature:
///
/// - a phased decay cools it over the course of the run ([`decay`]),
/// - the stagnation policy heats it back up, and enlarges the population,
///   when too many generations pass without improvement ([`observe_batch`]).
///
/// [`decay`]: AdaptiveSchedule::decay
/// [`observe_batch`]: AdaptiveSchedule::observe_batch
#[derive(Debug, Clone)]
pub struct AdaptiveSchedule {
    temperature: f64,
    ceiling: f64,
    floor: f64,
    step: f64,
    population_size: usize,
    size_increment: usize,
    stagnation_limit: usize,
    phase_length: usize,
    worse_streak: usize,
}

impl AdaptiveSchedule {
    pub fn new(config: &SearchConfig) -> Self {
        let phase_length = (config.max_generations as f64 / config.phases as f64).round() as usize;
        Self {
            temperature: config.initial_temperature,
            ceiling: config.temperature_ceiling,
            floor: config.temperature_floor,
            step: config.temperature_step,
            population_size: config.population_size,
            size_increment: config.size_increment,
            stagnation_limit: config.stagnation_limit,
            phase_length: phase_length.max(1),
            worse_streak: 0,
        }
    }

    /// Current oracle temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Current working population size.
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Consecutive generations without strict improvement.
    pub fn worse_streak(&self) -> usize {
        self.worse_streak
    }

    /// Judges one generation's candidate batch against the best cost so far.
    ///
    /// `batch_best` is the lowest cost among the evaluated candidates the
    /// oracle returned, or `None` when it returned none; in that case the
    /// streak is left untouched, since there is nothing to compare. A batch
    /// that fails to strictly improve extends the streak; an improving one
    /// resets it.
    ///
    /// Once the streak exceeds the stagnation limit it resets, and, while
    /// the temperature is still under its ceiling, the temperature rises by
    /// one step and the working population grows by the configured
    /// increment. Returns `true` when the knobs changed.
    pub fn observe_batch(&mut self, batch_best: Option<f64>, best_cost: f64) -> bool {
        if let Some(cost) = batch_best {
            if cost < best_cost {
                self.worse_streak = 0;
            } else {
                self.worse_streak += 1;
            }
        }

        if self.worse_streak > self.stagnation_limit {
            self.worse_streak = 0;
            if self.temperature < self.ceiling {
                self.temperature = round_to(self.temperature + self.step, TEMPERATURE_DECIMALS);
                self.population_size += self.size_increment;
                return true;
            }
        }
        false
    }

    /// Applies the phased decay for this generation.
    ///
    /// Cools by one step on every generation that is not a multiple of the
    /// phase length, while the step would not push the temperature to the
    /// floor or below. Returns `true` when the temperature changed.
    pub fn decay(&mut self, generation: usize) -> bool {
        if generation % self.phase_length != 0 && self.temperature - self.step > self.floor {
            self.temperature = round_to(self.temperature - self.step, TEMPERATURE_DECIMALS);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> AdaptiveSchedule {
        // phase length 25
        AdaptiveSchedule::new(&SearchConfig::new(100.0))
    }

    #[test]
    fn test_initial_state_mirrors_config() {
        let schedule = schedule();
        assert_eq!(schedule.temperature(), 2.0);
        assert_eq!(schedule.population_size(), 25);
        assert_eq!(schedule.worse_streak(), 0);
    }

    #[test]
    fn test_unimproving_batch_extends_streak() {
        let mut schedule = schedule();
        assert!(!schedule.observe_batch(Some(40.0), 30.0));
        assert!(!schedule.observe_batch(Some(30.0), 30.0));
        assert_eq!(schedule.worse_streak(), 2);
    }

    #[test]
    fn test_improving_batch_resets_streak() {
        let mut schedule = schedule();
        schedule.observe_batch(Some(40.0), 30.0);
        schedule.observe_batch(Some(40.0), 30.0);
        schedule.observe_batch(Some(20.0), 30.0);
        assert_eq!(schedule.worse_streak(), 0);
    }

    #[test]
    fn test_missing_batch_leaves_streak_untouched() {
        let mut schedule = schedule();
        schedule.observe_batch(Some(40.0), 30.0);
        schedule.observe_batch(None, 30.0);
        assert_eq!(schedule.worse_streak(), 1);
    }

    #[test]
    fn test_streak_overflow_widens_exploration_once() {
        let config = SearchConfig::new(100.0).with_initial_temperature(1.0);
        let mut schedule = AdaptiveSchedule::new(&config);

        let mut widened = 0;
        for _ in 0..21 {
            if schedule.observe_batch(Some(40.0), 30.0) {
                widened += 1;
            }
        }

        assert_eq!(widened, 1);
        assert_eq!(schedule.temperature(), 1.05);
        assert_eq!(schedule.population_size(), 27);
        assert_eq!(schedule.worse_streak(), 0);
    }

    #[test]
    fn test_widening_blocked_at_ceiling_still_resets_streak() {
        // initial temperature equals the ceiling
        let mut schedule = schedule();
        for _ in 0..21 {
            assert!(!schedule.observe_batch(Some(40.0), 30.0));
        }
        assert_eq!(schedule.temperature(), 2.0);
        assert_eq!(schedule.population_size(), 25);
        assert_eq!(schedule.worse_streak(), 0);
    }

    #[test]
    fn test_decay_skips_phase_boundaries() {
        let mut schedule = schedule();
        assert!(schedule.decay(1));
        assert_eq!(schedule.temperature(), 1.95);
        assert!(!schedule.decay(25));
        assert_eq!(schedule.temperature(), 1.95);
        assert!(schedule.decay(26));
        assert_eq!(schedule.temperature(), 1.9);
    }

    #[test]
    fn test_decay_stops_at_the_floor() {
        let config = SearchConfig::new(100.0).with_initial_temperature(0.2);
        let mut schedule = AdaptiveSchedule::new(&config);

        assert!(schedule.decay(1));
        assert_eq!(schedule.temperature(), 0.15);
        // another step would land on the floor
        assert!(!schedule.decay(2));
        assert_eq!(schedule.temperature(), 0.15);
    }

    #[test]
    fn test_repeated_decay_stays_exact() {
        let mut schedule = schedule();
        for generation in 1..=10 {
            schedule.decay(generation);
        }
        assert_eq!(schedule.temperature(), 1.5);
    }

    #[test]
    fn test_phase_length_never_zero() {
        let config = SearchConfig::new(100.0)
            .with_max_generations(3)
            .with_phases(3);
        let mut schedule = AdaptiveSchedule::new(&config);
        // phase length 1: every generation is a boundary, no decay
        assert!(!schedule.decay(1));
        assert!(!schedule.decay(2));
        assert_eq!(schedule.temperature(), 2.0);
    }
}
