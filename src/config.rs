use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    envs::lorenz::{Parameters, State},
    error::{LorenzError, Result},
    integrate::Scheme,
    simulator::DEFAULT_MAX_POINTS,
    trajectory::validate_inputs,
};

/// Run settings, read from TOML. Missing keys fall back to the canonical
/// chaotic regime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
    pub dt: f64,
    pub steps: usize,
    pub x0: f64,
    pub y0: f64,
    pub z0: f64,
    pub epsilon: f64,
    pub scheme: Scheme,
    pub max_points: usize,
    pub steps_per_tick: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        let params = Parameters::default();
        Self {
            sigma: params.sigma,
            rho: params.rho,
            beta: params.beta,
            dt: 0.01,
            steps: 10_000,
            x0: 0.1,
            y0: 0.,
            z0: 0.,
            epsilon: 1e-5,
            scheme: Scheme::Rk4,
            max_points: DEFAULT_MAX_POINTS,
            steps_per_tick: 5,
        }
    }
}

impl RunConfig {
    pub fn from_toml(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| LorenzError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&raw)?;
        log::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn params(&self) -> Parameters {
        Parameters::new(self.sigma, self.rho, self.beta)
    }

    pub fn initial(&self) -> State {
        State::new(self.x0, self.y0, self.z0)
    }

    pub fn validate(&self) -> Result<()> {
        validate_inputs(&self.initial(), &self.params(), self.dt)?;

        if !(2. * self.epsilon).is_finite() {
            return Err(LorenzError::invalid(
                "epsilon",
                self.epsilon,
                "must be finite with a finite range width",
            ));
        }

        Ok(())
    }
}
