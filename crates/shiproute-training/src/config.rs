use serde::{Deserialize, Serialize};
use shiproute_grid::ConfigurationError;

use crate::{
    crossover::DEFAULT_CROSSOVER_RATE, genotype::Genotype, mutation::DEFAULT_MUTATION_RATE,
    selection::Selector,
};

/// Parameters of one evolutionary run.
///
/// Missing fields take their defaults when deserialized, so a configuration file only
/// needs to list what it changes:
///
/// ```
/// use shiproute_training::config::EvolutionConfig;
///
/// let config: EvolutionConfig = serde_json::from_str(r#"{ "population_size": 50 }"#)?;
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.genotype_length, 100);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Number of moves per genotype
    pub genotype_length: usize,
    /// Number of individuals per generation (constant across the run)
    pub population_size: usize,
    /// Probability of redrawing each gene
    pub mutation_rate: f64,
    /// Probability of crossing each selected pair
    pub crossover_rate: f64,
    /// Number of selection, crossover and mutation passes after the initial population
    pub generation_limit: usize,
    /// Parent selection strategy
    pub selector: Selector,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            genotype_length: Genotype::DEFAULT_LENGTH,
            population_size: 200,
            mutation_rate: DEFAULT_MUTATION_RATE,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            generation_limit: 100,
            selector: Selector::default(),
        }
    }
}

impl EvolutionConfig {
    /// Checks every parameter, reporting the first one out of range.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_size("genotype length", self.genotype_length, 1)?;
        check_size("population size", self.population_size, 2)?;
        check_size("generation limit", self.generation_limit, 1)?;
        check_rate("mutation rate", self.mutation_rate)?;
        check_rate("crossover rate", self.crossover_rate)?;
        self.selector.validate()
    }
}

fn check_size(name: &'static str, value: usize, min: usize) -> Result<(), ConfigurationError> {
    if value < min {
        return Err(ConfigurationError::SizeTooSmall { name, value, min });
    }
    Ok(())
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigurationError::RateOutOfRange { name, value });
    }
    Ok(())
}
