//! Synthetic workload generation.
//!
//! Produces rounds of process definitions from randomized parameters.
//! Randomness is always injected by the caller; this module never seeds
//! or owns a random source.
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use cpu_sched_sim::workload::{generate_round, GeneratorConfig};
//!
//! let config = GeneratorConfig::default()
//!     .with_process_count(3, 5)
//!     .with_service_range(1, 6);
//! let mut rng = SmallRng::seed_from_u64(7);
//! let round = generate_round(&config, &mut rng).unwrap();
//! assert!((3..=5).contains(&round.len()));
//! ```

mod config;
mod generator;

pub use config::{Distribution, GeneratorConfig, NamingScheme};
pub use generator::{generate_round, sequential_id};
