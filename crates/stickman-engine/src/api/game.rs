use crate::core::time::TICK_DT;

/// Runtime configuration for the host loop, independent of level content.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum number of entity instances written per frame (default: 512).
    pub max_instances: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: TICK_DT,
            max_instances: 512,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_sixty_hertz() {
        let config = GameConfig::default();
        assert!((config.fixed_dt * 60.0 - 1.0).abs() < 1e-6);
        assert_eq!(config.max_instances, 512);
    }
}
