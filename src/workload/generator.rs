//! Round generator.
//!
//! # Algorithm
//!
//! 1. Draw the process count `n` uniformly from `[min, max]`.
//! 2. Derive the maximum arrival tick (fixed, or `n + gap`).
//! 3. For each process draw arrival and service independently, clamp them
//!    into `[0, max_arrival]` and `[min_service, max_service]`, and force a
//!    zero service up to 1.
//! 4. Optionally sort by `(arrival, id)`.
//!
//! Exponential draws use inverse transform sampling: `x = -mean * ln(u)`
//! with `u` uniform in `(0, 1]`, rounded to the nearest integer and clamped.
//! The result is a bounded, discretized exponential, not a pure tail.
//!
//! # Reference
//! Law (2015), "Simulation Modeling and Analysis", Ch. 8.2 (Inverse Transform)

use rand::Rng;

use super::{Distribution, GeneratorConfig, NamingScheme};
use crate::models::{sort_round, ProcessDefinition, Ticks};
use crate::validation::ValidationError;

/// Generates one round from `config` using the caller's random source.
///
/// # Errors
/// `InvalidBounds` if the process-count or service bounds are inverted or
/// an exponential mean is not a positive finite number.
pub fn generate_round<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<ProcessDefinition>, ValidationError> {
    config.validate()?;

    let n = rng.random_range(config.min_processes..=config.max_processes);
    let max_arrival = config
        .max_arrival
        .unwrap_or(n as Ticks + config.arrival_gap);

    let mut round = Vec::with_capacity(n);
    for idx in 0..n {
        let id = match config.naming {
            NamingScheme::Alphabetic => sequential_id(idx),
            NamingScheme::Numbered => format!("P{}", idx + 1),
        };
        let arrival = draw(rng, config.arrival_distribution, 0, max_arrival);
        let service = draw(
            rng,
            config.service_distribution,
            config.min_service,
            config.max_service,
        )
        .max(1);
        round.push(ProcessDefinition::new(id, arrival, service));
    }

    if config.sort_by_arrival {
        sort_round(&mut round);
    }

    log::debug!(
        "generated round of {} processes (max arrival {})",
        round.len(),
        max_arrival
    );
    Ok(round)
}

/// Draws a value in `[min, max]` from `dist`.
fn draw<R: Rng + ?Sized>(rng: &mut R, dist: Distribution, min: Ticks, max: Ticks) -> Ticks {
    match dist {
        Distribution::Uniform => rng.random_range(min..=max),
        Distribution::Exponential { mean } => {
            let u = 1.0 - rng.random::<f64>();
            let x = -mean * u.ln();
            x.round().clamp(min as f64, max as f64) as Ticks
        }
    }
}

/// Base-26 alphabetic label for the `idx`-th process: `A`..`Z`, `AA`, `AB`, ...
pub fn sequential_id(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_round, ValidationErrorKind};
    use rand::rngs::SmallRng;
    use rand::{RngCore, SeedableRng};

    #[test]
    fn test_sequential_ids() {
        assert_eq!(sequential_id(0), "A");
        assert_eq!(sequential_id(25), "Z");
        assert_eq!(sequential_id(26), "AA");
        assert_eq!(sequential_id(27), "AB");
        assert_eq!(sequential_id(51), "AZ");
        assert_eq!(sequential_id(52), "BA");
        assert_eq!(sequential_id(701), "ZZ");
        assert_eq!(sequential_id(702), "AAA");
    }

    #[test]
    fn test_fixed_service_range() {
        let config = GeneratorConfig::default()
            .with_process_count(5, 20)
            .with_service_range(4, 4);
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let round = generate_round(&config, &mut rng).unwrap();
            assert!(round.iter().all(|p| p.service == 4));
        }
    }

    #[test]
    fn test_count_and_arrival_bounds() {
        let config = GeneratorConfig::default()
            .with_process_count(3, 8)
            .with_service_range(1, 9)
            .with_arrival_gap(2);
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..50 {
            let round = generate_round(&config, &mut rng).unwrap();
            let n = round.len();
            assert!((3..=8).contains(&n));
            assert!(round.iter().all(|p| p.arrival <= n as Ticks + 2));
            assert!(round.iter().all(|p| (1..=9).contains(&p.service)));
            assert!(validate_round(&round).is_ok());
        }
    }

    #[test]
    fn test_sorted_by_arrival_then_id() {
        let config = GeneratorConfig::default()
            .with_process_count(10, 10)
            .with_service_range(1, 5)
            .with_max_arrival(3);
        let mut rng = SmallRng::seed_from_u64(9);
        let round = generate_round(&config, &mut rng).unwrap();
        for pair in round.windows(2) {
            assert!((pair[0].arrival, &pair[0].id) <= (pair[1].arrival, &pair[1].id));
        }
        assert!(round.iter().all(|p| p.arrival <= 3));
    }

    #[test]
    fn test_unsorted_keeps_generation_order() {
        let config = GeneratorConfig::default()
            .with_process_count(4, 4)
            .with_naming(NamingScheme::Numbered)
            .with_sorting(false);
        let mut rng = SmallRng::seed_from_u64(3);
        let round = generate_round(&config, &mut rng).unwrap();
        let ids: Vec<&str> = round.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2", "P3", "P4"]);
    }

    #[test]
    fn test_zero_service_forced_to_one() {
        let config = GeneratorConfig::default()
            .with_process_count(6, 6)
            .with_service_range(0, 0);
        let mut rng = SmallRng::seed_from_u64(5);
        let round = generate_round(&config, &mut rng).unwrap();
        assert!(round.iter().all(|p| p.service == 1));
    }

    #[test]
    fn test_exponential_is_clamped() {
        let config = GeneratorConfig::default()
            .with_process_count(30, 30)
            .with_service_range(2, 5)
            .with_service_distribution(Distribution::Exponential { mean: 40.0 })
            .with_arrival_distribution(Distribution::Exponential { mean: 0.5 })
            .with_max_arrival(4);
        let mut rng = SmallRng::seed_from_u64(11);
        let round = generate_round(&config, &mut rng).unwrap();
        assert!(round.iter().all(|p| (2..=5).contains(&p.service)));
        assert!(round.iter().all(|p| p.arrival <= 4));
    }

    #[test]
    fn test_same_seed_same_round() {
        let config = GeneratorConfig::default()
            .with_process_count(2, 12)
            .with_service_range(1, 8);
        let a = generate_round(&config, &mut SmallRng::seed_from_u64(77)).unwrap();
        let b = generate_round(&config, &mut SmallRng::seed_from_u64(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_accepts_trait_object_rng() {
        let config = GeneratorConfig::default()
            .with_process_count(3, 3)
            .with_service_range(2, 2);
        let mut small = SmallRng::seed_from_u64(8);
        let rng: &mut dyn RngCore = &mut small;
        let round = generate_round(&config, rng).unwrap();
        assert_eq!(round.len(), 3);
        assert!(round.iter().all(|p| p.service == 2));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig::default().with_process_count(4, 1);
        let err = generate_round(&config, &mut SmallRng::seed_from_u64(0)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidBounds);
    }
}
