//! Sample Transaction Generator
//!
//! Writes a synthetic transaction CSV (Time, V1..V28, Amount, Class) for
//! exercising the analyzer.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

const FEATURES: usize = 28;

#[derive(Parser, Debug)]
#[command(name = "sample-generator", about = "Generate a synthetic transaction CSV")]
struct Args {
    /// Number of transactions
    #[arg(short = 'n', long, default_value_t = 1000)]
    rows: u64,

    /// Probability that a transaction is fraudulent
    #[arg(long, default_value_t = 0.02, value_parser = parse_rate)]
    fraud_rate: f64,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Omit the Class column (exercises the simulated path)
    #[arg(long)]
    unlabeled: bool,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Synthetic transaction generator
struct TransactionGenerator {
    rng: StdRng,
    clock: f64,
}

impl TransactionGenerator {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            clock: 0.0,
        }
    }

    /// Seconds since the first transaction; a few seconds apart on average
    fn next_time(&mut self) -> f64 {
        self.clock += self.rng.gen_range(0.0..8.0_f64).floor();
        self.clock
    }

    /// A typical transaction: features near zero, modest amount
    fn generate_legitimate(&mut self) -> (f64, Vec<f64>, f64) {
        let time = self.next_time();
        let features = (0..FEATURES).map(|_| self.rng.gen_range(-1.5..1.5)).collect();
        let amount = self.rng.gen_range(1.0..250.0);
        (time, features, amount)
    }

    /// A suspicious transaction: shifted leading features, wider amount range
    fn generate_suspicious(&mut self) -> (f64, Vec<f64>, f64) {
        let time = self.next_time();
        let features = (0..FEATURES)
            .map(|i| {
                if i < 5 {
                    self.rng.gen_range(-6.0..-2.0)
                } else {
                    self.rng.gen_range(-2.5..2.5)
                }
            })
            .collect();
        let amount = self.rng.gen_range(0.5..2500.0);
        (time, features, amount)
    }
}

/// Parse a probability, rejecting NaN, infinities and values outside [0, 1]
fn parse_rate(s: &str) -> std::result::Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("invalid rate '{}': {}", s, e))?;
    if rate.is_finite() && (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("rate must be between 0 and 1, got {}", s))
    }
}

fn write_csv<W: Write>(out: &mut W, args: &Args) -> Result<(u64, u64)> {
    let mut header: Vec<String> = vec!["Time".to_string()];
    header.extend((1..=FEATURES).map(|i| format!("V{}", i)));
    header.push("Amount".to_string());
    if !args.unlabeled {
        header.push("Class".to_string());
    }
    writeln!(out, "{}", header.join(","))?;

    let mut generator = TransactionGenerator::new(args.seed);
    let mut picker = StdRng::seed_from_u64(args.seed.wrapping_add(1));
    let mut legitimate = 0;
    let mut suspicious = 0;

    for _ in 0..args.rows {
        let fraud = picker.gen_bool(args.fraud_rate);
        let (time, features, amount) = if fraud {
            suspicious += 1;
            generator.generate_suspicious()
        } else {
            legitimate += 1;
            generator.generate_legitimate()
        };

        let mut fields: Vec<String> = Vec::with_capacity(FEATURES + 3);
        fields.push(format!("{}", time));
        fields.extend(features.iter().map(|v| format!("{:.6}", v)));
        fields.push(format!("{:.2}", amount));
        if !args.unlabeled {
            fields.push(if fraud { "1" } else { "0" }.to_string());
        }
        writeln!(out, "{}", fields.join(","))?;
    }

    out.flush()?;
    Ok((legitimate, suspicious))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sample_generator=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    info!(
        rows = args.rows,
        fraud_rate = args.fraud_rate,
        seed = args.seed,
        unlabeled = args.unlabeled,
        "Generating sample transactions"
    );

    let (legitimate, suspicious) = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_csv(&mut BufWriter::new(file), &args)?
        }
        None => write_csv(&mut io::stdout().lock(), &args)?,
    };

    info!(legitimate, suspicious, "Completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_must_be_finite_probability() {
        assert_eq!(parse_rate("0.25"), Ok(0.25));
        assert_eq!(parse_rate("1"), Ok(1.0));
        for bad in ["NaN", "inf", "-0.1", "1.5", "often"] {
            assert!(parse_rate(bad).is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_nan_rate_rejected_on_command_line() {
        assert!(Args::try_parse_from(["sample-generator", "--fraud-rate", "NaN"]).is_err());
        let args = Args::try_parse_from(["sample-generator", "--fraud-rate", "0.5"]).unwrap();
        assert_eq!(args.fraud_rate, 0.5);
    }
}
