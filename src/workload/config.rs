//! Generator configuration.

use serde::{Deserialize, Serialize};

use crate::models::Ticks;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Probability distribution for arrival or service draws.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    /// Every integer in the configured range is equally likely.
    #[default]
    Uniform,
    /// Discretized exponential with the given mean, clamped to the range.
    Exponential {
        /// Mean of the underlying continuous distribution (> 0).
        mean: f64,
    },
}

/// How generated processes are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingScheme {
    /// `A`, `B`, ..., `Z`, `AA`, `AB`, ...
    #[default]
    Alphabetic,
    /// `P1`, `P2`, ...
    Numbered,
}

/// Parameters for [`super::generate_round`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Minimum process count.
    pub min_processes: usize,
    /// Maximum process count.
    pub max_processes: usize,
    /// Minimum service time.
    pub min_service: Ticks,
    /// Maximum service time.
    pub max_service: Ticks,
    /// Distribution of service times.
    pub service_distribution: Distribution,
    /// Distribution of arrival ticks.
    pub arrival_distribution: Distribution,
    /// Fixed maximum arrival tick. `None` = process count + `arrival_gap`.
    pub max_arrival: Option<Ticks>,
    /// Added to the process count to derive the maximum arrival tick.
    pub arrival_gap: Ticks,
    /// Sort the round by `(arrival, id)`.
    pub sort_by_arrival: bool,
    /// Labelling scheme.
    pub naming: NamingScheme,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_processes: 1,
            max_processes: 1,
            min_service: 1,
            max_service: 1,
            service_distribution: Distribution::Uniform,
            arrival_distribution: Distribution::Uniform,
            max_arrival: None,
            arrival_gap: 0,
            sort_by_arrival: true,
            naming: NamingScheme::Alphabetic,
        }
    }
}

impl GeneratorConfig {
    /// Sets the process count range.
    pub fn with_process_count(mut self, min: usize, max: usize) -> Self {
        self.min_processes = min;
        self.max_processes = max;
        self
    }

    /// Sets the service time range.
    pub fn with_service_range(mut self, min: Ticks, max: Ticks) -> Self {
        self.min_service = min;
        self.max_service = max;
        self
    }

    /// Sets the service distribution.
    pub fn with_service_distribution(mut self, dist: Distribution) -> Self {
        self.service_distribution = dist;
        self
    }

    /// Sets the arrival distribution.
    pub fn with_arrival_distribution(mut self, dist: Distribution) -> Self {
        self.arrival_distribution = dist;
        self
    }

    /// Fixes the maximum arrival tick, overriding the gap.
    pub fn with_max_arrival(mut self, max_arrival: Ticks) -> Self {
        self.max_arrival = Some(max_arrival);
        self
    }

    /// Derives the maximum arrival tick as process count + `gap`.
    pub fn with_arrival_gap(mut self, gap: Ticks) -> Self {
        self.arrival_gap = gap;
        self.max_arrival = None;
        self
    }

    /// Sets the labelling scheme.
    pub fn with_naming(mut self, naming: NamingScheme) -> Self {
        self.naming = naming;
        self
    }

    /// Enables or disables `(arrival, id)` sorting.
    pub fn with_sorting(mut self, sort: bool) -> Self {
        self.sort_by_arrival = sort;
        self
    }

    /// Checks bounds and distribution parameters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_processes < self.min_processes {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidBounds,
                format!(
                    "max_processes ({}) < min_processes ({})",
                    self.max_processes, self.min_processes
                ),
            ));
        }
        if self.max_service < self.min_service {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidBounds,
                format!(
                    "max_service ({}) < min_service ({})",
                    self.max_service, self.min_service
                ),
            ));
        }
        for (what, dist) in [
            ("service", self.service_distribution),
            ("arrival", self.arrival_distribution),
        ] {
            if let Distribution::Exponential { mean } = dist {
                if !(mean.is_finite() && mean > 0.0) {
                    return Err(ValidationError::new(
                        ValidationErrorKind::InvalidBounds,
                        format!("{what} exponential mean must be positive, got {mean}"),
                    ));
                }
            }
        }
        Ok(())
    }
}
