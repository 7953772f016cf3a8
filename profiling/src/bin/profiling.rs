use serde::Deserialize;
use serde_jsonlines::json_lines;
use std::ops::Range;
use std::path::Path;
use std::time::{Duration, Instant};
use textscore::{bleu, cer, mer, wer, ComputationError};

use clap::Parser;

#[derive(Deserialize)]
struct Example {
    reference: String,
    candidate: String,
}

fn build_pairs<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<(String, String)>> {
    json_lines::<Example, P>(path)?
        .map(|r| r.map(|ex| (ex.reference, ex.candidate)))
        .collect()
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Metric {
    Bleu,
    Wer,
    Cer,
    Mer,
}

impl Metric {
    fn compute(&self, reference: &str, candidate: &str) -> Result<f64, ComputationError> {
        match self {
            Self::Bleu => bleu(reference, candidate),
            Self::Wer => wer(reference, candidate),
            Self::Cer => cer(reference, candidate),
            Self::Mer => mer(reference, candidate),
        }
    }
}

#[derive(Debug, Parser)]
struct Args {
    #[arg(short, long, default_value_t = 1)]
    n_samples: u32,
    #[arg(short, long, default_value_t=String::from("big"))]
    dataset: String,
    #[arg(short, long, value_enum, default_value_t = Metric::Wer)]
    metric: Metric,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let n_samples = args.n_samples;
    let iter = Range {
        start: 0,
        end: n_samples,
    };
    let mut total_duration = Duration::ZERO;
    let path = format!("./data/datasets/{}_pairs.jsonl", args.dataset);
    let pairs = build_pairs(&path)?;
    log::info!("Loaded {} pairs from {}", pairs.len(), path);
    let mut skipped = 0usize;
    for _ in iter {
        let now = Instant::now();
        for (reference, candidate) in pairs.iter() {
            match args.metric.compute(reference, candidate) {
                Ok(_) => {}
                Err(ComputationError::EmptyReference(_)) => skipped += 1,
                Err(e) => return Err(e.into()),
            }
        }
        let elapsed = now.elapsed();
        total_duration += elapsed;
    }
    if skipped > 0 {
        log::warn!("Skipped {} pairs with an empty reference", skipped);
    }
    println!(
        "Total duration: {} with {n_samples} samples",
        total_duration.as_secs_f64()
    );
    Ok(())
}
