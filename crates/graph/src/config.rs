use serde::{Deserialize, Serialize};

/// Parameters of the symbol graph and its PageRank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Probability of following an edge rather than teleporting
    pub damping: f64,

    /// Power-iteration cap
    pub max_iterations: usize,

    /// Per-node convergence tolerance; iteration stops once the L1 change
    /// drops below `node_count * tolerance`
    pub tolerance: f64,

    /// Edge weight multiplier for identifiers the caller asked about
    pub mentioned_ident_boost: f64,

    /// Personalization mass shared out as `total / file_count` per mentioned file
    pub personalization_total: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1.0e-6,
            mentioned_ident_boost: 10.0,
            personalization_total: 100.0,
        }
    }
}

impl RankingConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(format!("damping ({}) must be in (0, 1)", self.damping));
        }

        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0".to_string());
        }

        if !(self.tolerance > 0.0) {
            return Err(format!("tolerance ({}) must be > 0", self.tolerance));
        }

        if !(self.mentioned_ident_boost > 0.0) {
            return Err(format!(
                "mentioned_ident_boost ({}) must be > 0",
                self.mentioned_ident_boost
            ));
        }

        if !(self.personalization_total > 0.0) {
            return Err(format!(
                "personalization_total ({}) must be > 0",
                self.personalization_total
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(RankingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = RankingConfig::default();

        config.damping = 1.0;
        assert!(config.validate().is_err());

        config.damping = 0.85;
        config.max_iterations = 0;
        assert!(config.validate().is_err());

        config.max_iterations = 100;
        config.tolerance = 0.0;
        assert!(config.validate().is_err());

        config.tolerance = 1.0e-6;
        config.mentioned_ident_boost = f64::NAN;
        assert!(config.validate().is_err());

        config.mentioned_ident_boost = 10.0;
        assert!(config.validate().is_ok());
    }
}
