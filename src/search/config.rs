//! Search configuration.

use std::time::Duration;

/// Configuration for an oracle-guided search run.
///
/// Controls the generation budget, the adaptive temperature schedule, the
/// stagnation policy and the oracle retry policy. The defaults are the
/// parameters the crate's reference experiments run with.
///
/// # Examples
///
/// ```
/// use evoracle::search::SearchConfig;
///
/// let config = SearchConfig::new(1652.0)
///     .with_population_size(30)
///     .with_max_generations(100)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Working population size at the start of the run.
    ///
    /// The stagnation policy may enlarge it while the run progresses.
    pub population_size: usize,

    /// Maximum number of generations before the run is exhausted.
    pub max_generations: usize,

    /// Number of cool-down phases the generation budget divides into.
    ///
    /// Temperature decays on every generation that is not a multiple of the
    /// resulting phase length.
    pub phases: usize,

    /// Oracle temperature at the start of the run.
    pub initial_temperature: f64,

    /// Temperature above which the stagnation policy stops widening.
    pub temperature_ceiling: f64,

    /// Temperature the scheduled decay will not cross.
    pub temperature_floor: f64,

    /// Amount every temperature move (decay or widening) uses.
    pub temperature_step: f64,

    /// How many individuals the stagnation policy adds to the working
    /// population size per widening.
    pub size_increment: usize,

    /// Consecutive unimproving generations tolerated before exploration is
    /// widened.
    pub stagnation_limit: usize,

    /// Maximum oracle attempts per generation before the run aborts.
    pub retry_limit: usize,

    /// Pause between oracle attempts.
    pub retry_backoff: Duration,

    /// Known optimal cost; matching it ends the run successfully.
    pub optimal_cost: f64,

    /// Random seed for the seeder. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// Creates a configuration targeting the given optimal cost, with the
    /// reference defaults for everything else.
    pub fn new(optimal_cost: f64) -> Self {
        Self {
            population_size: 25,
            max_generations: 250,
            phases: 10,
            initial_temperature: 2.0,
            temperature_ceiling: 2.0,
            temperature_floor: 0.1,
            temperature_step: 0.05,
            size_increment: 2,
            stagnation_limit: 20,
            retry_limit: 10,
            retry_backoff: Duration::from_secs(1),
            optimal_cost,
            seed: None,
        }
    }

    /// Sets the starting population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the number of cool-down phases.
    pub fn with_phases(mut self, n: usize) -> Self {
        self.phases = n;
        self
    }

    /// Sets the starting temperature.
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Sets the temperature ceiling for the stagnation policy.
    pub fn with_temperature_ceiling(mut self, t: f64) -> Self {
        self.temperature_ceiling = t;
        self
    }

    /// Sets the temperature floor for the scheduled decay.
    pub fn with_temperature_floor(mut self, t: f64) -> Self {
        self.temperature_floor = t;
        self
    }

    /// Sets the temperature step.
    pub fn with_temperature_step(mut self, step: f64) -> Self {
        self.temperature_step = step;
        self
    }

    /// Sets the population-size increment per widening.
    pub fn with_size_increment(mut self, n: usize) -> Self {
        self.size_increment = n;
        self
    }

    /// Sets the stagnation limit.
    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.stagnation_limit = n;
        self
    }

    /// Sets the oracle retry limit.
    pub fn with_retry_limit(mut self, n: usize) -> Self {
        self.retry_limit = n;
        self
    }

    /// Sets the pause between oracle attempts.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is unusable.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.phases == 0 || self.phases > self.max_generations {
            return Err("phases must be between 1 and max_generations".into());
        }
        if self.initial_temperature <= 0.0 {
            return Err("initial_temperature must be positive".into());
        }
        if self.temperature_floor <= 0.0 {
            return Err("temperature_floor must be positive".into());
        }
        if self.temperature_floor > self.initial_temperature {
            return Err("temperature_floor must not exceed initial_temperature".into());
        }
        if self.temperature_step <= 0.0 {
            return Err("temperature_step must be positive".into());
        }
        if self.stagnation_limit == 0 {
            return Err("stagnation_limit must be at least 1".into());
        }
        if self.retry_limit == 0 {
            return Err("retry_limit must be at least 1".into());
        }
        if !self.optimal_cost.is_finite() || self.optimal_cost <= 0.0 {
            return Err("optimal_cost must be positive and finite".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let config = SearchConfig::new(100.0);
        assert_eq!(config.population_size, 25);
        assert_eq!(config.max_generations, 250);
        assert_eq!(config.phases, 10);
        assert_eq!(config.initial_temperature, 2.0);
        assert_eq!(config.temperature_ceiling, 2.0);
        assert_eq!(config.temperature_floor, 0.1);
        assert_eq!(config.temperature_step, 0.05);
        assert_eq!(config.size_increment, 2);
        assert_eq!(config.stagnation_limit, 20);
        assert_eq!(config.retry_limit, 10);
        assert_eq!(config.retry_backoff, Duration::from_secs(1));
        assert_eq!(config.optimal_cost, 100.0);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = SearchConfig::new(50.0)
            .with_population_size(10)
            .with_max_generations(40)
            .with_phases(4)
            .with_initial_temperature(1.5)
            .with_temperature_ceiling(1.8)
            .with_temperature_floor(0.2)
            .with_temperature_step(0.1)
            .with_size_increment(3)
            .with_stagnation_limit(5)
            .with_retry_limit(2)
            .with_retry_backoff(Duration::from_millis(10))
            .with_seed(42);

        assert_eq!(config.population_size, 10);
        assert_eq!(config.max_generations, 40);
        assert_eq!(config.phases, 4);
        assert_eq!(config.initial_temperature, 1.5);
        assert_eq!(config.temperature_ceiling, 1.8);
        assert_eq!(config.temperature_floor, 0.2);
        assert_eq!(config.temperature_step, 0.1);
        assert_eq!(config.size_increment, 3);
        assert_eq!(config.stagnation_limit, 5);
        assert_eq!(config.retry_limit, 2);
        assert_eq!(config.retry_backoff, Duration::from_millis(10));
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_population() {
        assert!(SearchConfig::new(1.0)
            .with_population_size(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_zero_generations() {
        assert!(SearchConfig::new(1.0)
            .with_max_generations(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_excess_phases() {
        assert!(SearchConfig::new(1.0)
            .with_max_generations(5)
            .with_phases(6)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_bad_temperatures() {
        assert!(SearchConfig::new(1.0)
            .with_initial_temperature(0.0)
            .validate()
            .is_err());
        assert!(SearchConfig::new(1.0)
            .with_temperature_floor(0.0)
            .validate()
            .is_err());
        assert!(SearchConfig::new(1.0)
            .with_initial_temperature(0.5)
            .with_temperature_floor(1.0)
            .validate()
            .is_err());
        assert!(SearchConfig::new(1.0)
            .with_temperature_step(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_unusable_optimum() {
        assert!(SearchConfig::new(0.0).validate().is_err());
        assert!(SearchConfig::new(-3.0).validate().is_err());
        assert!(SearchConfig::new(f64::NAN).validate().is_err());
        assert!(SearchConfig::new(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_retries_and_stagnation() {
        assert!(SearchConfig::new(1.0)
            .with_retry_limit(0)
            .validate()
            .is_err());
        assert!(SearchConfig::new(1.0)
            .with_stagnation_limit(0)
            .validate()
            .is_err());
    }
}
