use anyhow::Result;
use clap::{Parser, ValueEnum};
use perc::{Config, PercolationStats, Sampling};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SamplingArg {
    Rejection,
    Shuffled,
}

impl From<SamplingArg> for Sampling {
    fn from(value: SamplingArg) -> Self {
        match value {
            SamplingArg::Rejection => Sampling::Rejection,
            SamplingArg::Shuffled => Sampling::Shuffled,
        }
    }
}

/// Estimates the percolation threshold of an n-by-n grid.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Arguments {
    /// Grid size.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    size: u64,

    /// Number of independent trials.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    trials: u64,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long)]
    threads: Option<usize>,

    #[arg(long, value_enum, default_value_t = SamplingArg::Rejection)]
    sampling: SamplingArg,

    #[arg(short, long, default_value_t = 2)]
    log_level: usize,
}

fn main() -> Result<()> {
    let args = Arguments::parse();

    stderrlog::new()
        .verbosity(args.log_level)
        .module(module_path!())
        .module("perc")
        .init()?;

    let config = Config {
        seed: args.seed,
        threads: args.threads,
        sampling: args.sampling.into(),
        ..Config::new(usize::try_from(args.size)?, usize::try_from(args.trials)?)
    };
    let stats = PercolationStats::with_config(&config)?;
    print!("{}", report(&stats));

    Ok(())
}

fn report(stats: &PercolationStats) -> String {
    format!(
        "mean                    = {}\n\
         stddev                  = {}\n\
         95% confidence interval = [{}, {}]\n",
        stats.mean(),
        stats.stddev(),
        stats.confidence_lo(),
        stats.confidence_hi()
    )
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn report_lines() {
        let stats = PercolationStats::new(1, 4).unwrap();
        assert_eq!(
            report(&stats),
            "mean                    = 1\n\
             stddev                  = 0\n\
             95% confidence interval = [1, 1]\n"
        );
    }

    #[test]
    fn parse_arguments() {
        let args = Arguments::try_parse_from(["perc-stats", "200", "100"]).unwrap();
        assert_eq!((args.size, args.trials), (200, 100));
        assert_eq!(args.seed, None);

        let args = Arguments::try_parse_from([
            "perc-stats",
            "5",
            "3",
            "--seed",
            "9",
            "--sampling",
            "shuffled",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(9));
        assert_eq!(Sampling::from(args.sampling), Sampling::Shuffled);
    }

    #[test]
    fn reject_bad_arguments() {
        for argv in [
            vec!["perc-stats"],
            vec!["perc-stats", "10"],
            vec!["perc-stats", "0", "10"],
            vec!["perc-stats", "10", "0"],
            vec!["perc-stats", "ten", "10"],
            vec!["perc-stats", "10", "-3"],
            vec!["perc-stats", "10", "2.5"],
        ] {
            assert!(Arguments::try_parse_from(argv.iter().copied()).is_err(), "{argv:?}");
        }
    }
}
