use serde::{Deserialize, Serialize};
use shiproute_evaluator::route_cost::RouteCostEvaluator;
use shiproute_grid::GridEnvironment;
use shiproute_training::config::EvolutionConfig;

/// Everything needed to reproduce a run besides the seed.
///
/// Loaded from `--config` (all fields optional) and then overridden by command-line
/// flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub grid: GridConfig,
    pub evolution: EvolutionConfig,
    pub stall_penalty: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            evolution: EvolutionConfig::default(),
            stall_penalty: RouteCostEvaluator::DEFAULT_STALL_PENALTY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub size: u32,
    pub obstacle_count: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: GridEnvironment::DEFAULT_SIZE,
            obstacle_count: GridEnvironment::DEFAULT_OBSTACLE_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_file() {
        let config: RunConfig =
            serde_json::from_str(r#"{ "grid": { "size": 8 }, "evolution": { "generation_limit": 5 } }"#)
                .unwrap();
        assert_eq!(config.grid.size, 8);
        assert_eq!(config.grid.obstacle_count, 30);
        assert_eq!(config.evolution.generation_limit, 5);
        assert_eq!(config.evolution.population_size, 200);
        assert_eq!(config.stall_penalty, 500.0);
    }
}
