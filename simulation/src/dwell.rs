use model::base_types::Duration;
use model::config::ConfigDwell;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// draws actual dwell times from a station's nominal dwell to model
/// passenger-load variability.
///
/// Wraps an explicitly seeded `ChaCha8Rng` so identical seeds produce
/// identical samples; there is no process-global randomness anywhere in a
/// run.
pub struct DwellSampler {
    lo: f64,
    hi: f64,
    rng: ChaCha8Rng,
}

impl DwellSampler {
    pub fn from_seed(config: &ConfigDwell, seed: u64) -> DwellSampler {
        DwellSampler {
            lo: config.variation_lo,
            hi: config.variation_hi,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// scales the nominal dwell by a crowding factor drawn uniformly from
    /// the configured range, truncated to whole seconds.
    pub fn sample(&mut self, base_dwell: Duration) -> Duration {
        let factor: f64 = self.rng.gen_range(self.lo..=self.hi);
        Duration::from_seconds_f64(base_dwell.in_sec() as f64 * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::config::SimulationConfig;

    fn sampler(seed: u64) -> DwellSampler {
        DwellSampler::from_seed(&SimulationConfig::default().dwell, seed)
    }

    #[test]
    fn identical_seeds_give_identical_samples() {
        let mut a = sampler(99);
        let mut b = sampler(99);
        let base = Duration::from_seconds(30);
        for _ in 0..50 {
            assert_eq!(a.sample(base), b.sample(base));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = sampler(1);
        let mut b = sampler(2);
        let base = Duration::from_seconds(30);
        let samples_a: Vec<Duration> = (0..20).map(|_| a.sample(base)).collect();
        let samples_b: Vec<Duration> = (0..20).map(|_| b.sample(base)).collect();
        assert_ne!(samples_a, samples_b);
    }

    #[test]
    fn samples_stay_inside_the_variation_range() {
        let mut sampler = sampler(7);
        let base = Duration::from_seconds(60);
        for _ in 0..200 {
            let dwell = sampler.sample(base).in_sec();
            // factor range 0.7..2.0 on a 60s base, truncated to whole seconds
            assert!(
                (42..=120).contains(&dwell),
                "sampled dwell {}s escaped the configured range",
                dwell
            );
        }
    }

    #[test]
    fn zero_base_dwell_stays_zero() {
        let mut sampler = sampler(7);
        assert_eq!(sampler.sample(Duration::ZERO), Duration::ZERO);
    }
}
