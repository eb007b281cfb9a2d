use std::time::Instant;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rayon::prelude::*;

use crate::{percolation::forest_len, Error, Percolation, Result};

////////////////////////////////////////////////////////////////////////////////

/// z-score of the two-sided 95% confidence interval.
pub const CONFIDENCE_95: f64 = 1.96;

/// How a trial picks the next site to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sampling {
    /// Draw uniform coordinates and redraw while the site is already open.
    /// Redraws pile up as the grid fills.
    #[default]
    Rejection,
    /// Shuffle every site once and open them in that order.
    Shuffled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub size: usize,
    pub trials: usize,
    /// Trial `i` is driven by a generator seeded with `seed + i`, so a seeded
    /// run gives the same samples on any number of threads.
    pub seed: Option<u64>,
    /// Dedicated worker count. `None` runs on rayon's global pool.
    pub threads: Option<usize>,
    pub sampling: Sampling,
}

impl Config {
    pub fn new(size: usize, trials: usize) -> Self {
        Self {
            size,
            trials,
            seed: None,
            threads: None,
            sampling: Sampling::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidArgument("grid size must be positive"));
        }
        if forest_len(self.size).is_none() {
            return Err(Error::InvalidArgument("grid size too large"));
        }
        if self.trials == 0 {
            return Err(Error::InvalidArgument("trial count must be positive"));
        }
        if self.threads == Some(0) {
            return Err(Error::InvalidArgument("thread count must be positive"));
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Opens random sites of a fresh `size`-by-`size` grid until it percolates and
/// returns the fraction of sites that ended up open.
pub fn run_trial<R: Rng + ?Sized>(size: usize, sampling: Sampling, rng: &mut R) -> Result<f64> {
    let mut grid = Percolation::new(size)?;

    match sampling {
        Sampling::Rejection => {
            while !grid.percolates() {
                let (mut row, mut col) = (rng.gen_range(1..=size), rng.gen_range(1..=size));
                while grid.is_open(row, col)? {
                    row = rng.gen_range(1..=size);
                    col = rng.gen_range(1..=size);
                }
                grid.open(row, col)?;
            }
        }
        Sampling::Shuffled => {
            let mut sites: Vec<usize> = (0..size * size).collect();
            sites.shuffle(rng);
            for id in sites {
                if grid.percolates() {
                    break;
                }
                grid.open(id / size + 1, id % size + 1)?;
            }
        }
    }

    Ok(grid.number_of_open_sites() as f64 / (size * size) as f64)
}

////////////////////////////////////////////////////////////////////////////////

/// Percolation threshold estimate over a batch of independent trials.
#[derive(Debug, Clone)]
pub struct PercolationStats {
    size: usize,
    samples: Vec<f64>,
}

impl PercolationStats {
    /// Runs `trials` trials on a `size`-by-`size` grid with default settings.
    pub fn new(size: usize, trials: usize) -> Result<Self> {
        Self::with_config(&Config::new(size, trials))
    }

    pub fn with_config(config: &Config) -> Result<Self> {
        config.validate()?;

        log::info!(
            "running {} trials on a {}x{} grid ({:?} sampling)",
            config.trials,
            config.size,
            config.size,
            config.sampling
        );
        let started = Instant::now();

        let samples = match config.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(|| Self::run_trials(config))?,
            None => Self::run_trials(config)?,
        };

        log::info!(
            "finished {} trials in {:.2?}",
            samples.len(),
            started.elapsed()
        );
        Ok(Self {
            size: config.size,
            samples,
        })
    }

    fn run_trials(config: &Config) -> Result<Vec<f64>> {
        (0..config.trials)
            .into_par_iter()
            .map(|trial| {
                let mut rng = match config.seed {
                    Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(trial as u64)),
                    None => StdRng::from_entropy(),
                };
                let threshold = run_trial(config.size, config.sampling, &mut rng)?;
                log::debug!("trial #{trial}: threshold {threshold}");
                Ok(threshold)
            })
            .collect()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn trials(&self) -> usize {
        self.samples.len()
    }

    /// Per-trial thresholds, in trial order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn mean(&self) -> f64 {
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Sample standard deviation. `NaN` for a single trial, since the
    /// `n - 1` denominator is zero.
    pub fn stddev(&self) -> f64 {
        let mean = self.mean();
        let squares: f64 = self.samples.iter().map(|x| (x - mean) * (x - mean)).sum();
        (squares / (self.samples.len() as f64 - 1.0)).sqrt()
    }

    fn half_width(&self) -> f64 {
        CONFIDENCE_95 * self.stddev() / (self.samples.len() as f64).sqrt()
    }

    pub fn confidence_lo(&self) -> f64 {
        self.mean() - self.half_width()
    }

    pub fn confidence_hi(&self) -> f64 {
        self.mean() + self.half_width()
    }
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stats_of(samples: &[f64]) -> PercolationStats {
        PercolationStats {
            size: 1,
            samples: samples.to_vec(),
        }
    }

    #[test]
    fn statistics() {
        let stats = stats_of(&[0.5, 0.6, 0.7]);
        assert!((stats.mean() - 0.6).abs() < 1e-12);
        assert!((stats.stddev() - 0.1).abs() < 1e-12);

        let half = CONFIDENCE_95 * 0.1 / 3f64.sqrt();
        assert!((stats.confidence_lo() - (0.6 - half)).abs() < 1e-12);
        assert!((stats.confidence_hi() - (0.6 + half)).abs() < 1e-12);
    }

    #[test]
    fn single_sample_stddev_is_nan() {
        let stats = stats_of(&[0.5]);
        assert_eq!(stats.mean(), 0.5);
        assert!(stats.stddev().is_nan());
        assert!(stats.confidence_lo().is_nan());
    }

    #[test]
    fn config_validation() {
        assert!(Config::new(3, 4).validate().is_ok());
        assert!(matches!(
            Config::new(0, 4).validate(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Config::new(3, 0).validate(),
            Err(Error::InvalidArgument(_))
        ));
        let config = Config {
            threads: Some(0),
            ..Config::new(3, 4)
        };
        assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            Config::new(1 << (usize::BITS / 2), 4).validate(),
            Err(Error::InvalidArgument("grid size too large"))
        ));
        assert!(matches!(
            PercolationStats::new(usize::MAX, 1),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn trial_threshold_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for sampling in [Sampling::Rejection, Sampling::Shuffled] {
            for size in 1..8 {
                let threshold = run_trial(size, sampling, &mut rng).unwrap();
                assert!(threshold > 0.0 && threshold <= 1.0);
                // A path needs at least one site per row.
                assert!(threshold >= 1.0 / size as f64);
            }
        }
    }

    #[test]
    fn one_by_one_trial() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(run_trial(1, Sampling::Rejection, &mut rng).unwrap(), 1.0);
        assert_eq!(run_trial(1, Sampling::Shuffled, &mut rng).unwrap(), 1.0);
    }
}
