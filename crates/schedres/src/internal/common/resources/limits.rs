use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::internal::common::error::SchedError;

/// Below these amounts (on every axis at once) a quantity counts as empty.
pub const MIN_MILLI_CPU: f64 = 10.0;
pub const MIN_MEMORY: f64 = 10.0 * 1024.0 * 1024.0;
pub const MIN_ACCELERATOR: f64 = 1.0;

/// Rounding slack allowed by `less_equal` on each axis.
pub const CPU_TOLERANCE: f64 = 0.01;
pub const MEMORY_TOLERANCE: f64 = 1.0;
pub const ACCELERATOR_TOLERANCE: f64 = 1.0;

/// Condition that has to hold before `other` can be subtracted from a quantity.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum SubtractGuard {
    /// The quantity must not be strictly smaller than `other` on every axis.
    /// A quantity that is smaller only on some axes passes, so a field may go negative.
    #[default]
    NotLess,
    /// `other` must fit into the quantity on every axis (within tolerances).
    Sufficient,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ResourceLimits {
    pub min_milli_cpu: f64,
    pub min_memory: f64,
    pub min_accelerator: f64,
    pub cpu_tolerance: f64,
    pub memory_tolerance: f64,
    pub accelerator_tolerance: f64,
    pub subtract_guard: SubtractGuard,
}

impl ResourceLimits {
    pub const DEFAULT: ResourceLimits = ResourceLimits {
        min_milli_cpu: MIN_MILLI_CPU,
        min_memory: MIN_MEMORY,
        min_accelerator: MIN_ACCELERATOR,
        cpu_tolerance: CPU_TOLERANCE,
        memory_tolerance: MEMORY_TOLERANCE,
        accelerator_tolerance: ACCELERATOR_TOLERANCE,
        subtract_guard: SubtractGuard::NotLess,
    };

    pub fn from_toml(input: &str) -> crate::Result<Self> {
        let limits: ResourceLimits = toml::from_str(input)?;
        limits.validate()?;
        Ok(limits)
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        log::debug!("Loading resource limits from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> crate::Result<()> {
        let values = [
            ("min-milli-cpu", self.min_milli_cpu),
            ("min-memory", self.min_memory),
            ("min-accelerator", self.min_accelerator),
            ("cpu-tolerance", self.cpu_tolerance),
            ("memory-tolerance", self.memory_tolerance),
            ("accelerator-tolerance", self.accelerator_tolerance),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(SchedError::ConfigError(format!(
                    "{name} has to be a non-negative number, found {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}
