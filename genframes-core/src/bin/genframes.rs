//! GeneticFrames CLI — genomic fingerprints and art traits from the terminal
//!
//! Commands:
//!   genframes analyze  — acquire + analyze a species, print JSON
//!   genframes mutate   — mutate a raw sequence
//!   genframes traits   — derive art traits for a raw sequence

use genframes_core::analysis::SequenceAnalysis;
use genframes_core::mutation::mutate_with;
use genframes_core::{derive_traits, mutate, GeneticFrames, Sequence, Settings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::env;
use std::process::ExitCode;

fn print_usage() {
    println!(
        r#"
GeneticFrames — DNA fingerprints and art traits

Usage: genframes <command> [options]

Commands:
  analyze  <species name...> [--rate <r>]   Acquire and analyze a species
  mutate   <sequence> <rate> [--seed <n>]   Mutate a raw sequence (rate in [0, 1])
  traits   <sequence>                       Derive art traits for a raw sequence
  help                                      Show this message

Environment:
  NCBI_LIVE_MODE=true       fetch real mitochondrial DNA from NCBI
  ENTREZ_EMAIL / ENTREZ_API_KEY / NCBI_TIMEOUT_SECONDS
  REDIS_ENABLED=true, REDIS_URL, CACHE_TTL_SECONDS

Examples:
  genframes analyze Panthera tigris
  genframes analyze Blue Whale --rate 0.05
  genframes mutate GATTACA 0.5
  genframes mutate GATTACA 0.5 --seed 42
"#
    );
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let outcome = match args[1].as_str() {
        "analyze" => cmd_analyze(&args[2..]).await,
        "mutate" => cmd_mutate(&args[2..]),
        "traits" => cmd_traits(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(format!("Unknown command: {}", other)),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("  {}", msg);
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn parse_rate(raw: &str) -> Result<f64, String> {
    raw.parse()
        .map_err(|_| format!("rate must be a number, got {:?}", raw))
}

async fn cmd_analyze(args: &[String]) -> Result<(), String> {
    let mut rate = 0.0;
    let mut words = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--rate" {
            let raw = iter.next().ok_or("--rate needs a value")?;
            rate = parse_rate(raw)?;
        } else {
            words.push(arg.as_str());
        }
    }
    if words.is_empty() {
        return Err("Usage: genframes analyze <species name...> [--rate <r>]".into());
    }
    let species = words.join(" ");

    let frames = GeneticFrames::from_settings(&Settings::from_env()).await;
    let result = frames
        .acquire_and_analyze(&species, rate)
        .await
        .map_err(|e| e.to_string())?;
    print_json(&result)
}

fn cmd_mutate(args: &[String]) -> Result<(), String> {
    let (raw_seq, raw_rate, seed) = match args {
        [raw_seq, raw_rate] => (raw_seq, raw_rate, None),
        [raw_seq, raw_rate, flag, raw_seed] if flag == "--seed" => {
            let seed: u64 = raw_seed
                .parse()
                .map_err(|_| format!("seed must be an unsigned integer, got {:?}", raw_seed))?;
            (raw_seq, raw_rate, Some(seed))
        }
        _ => return Err("Usage: genframes mutate <sequence> <rate> [--seed <n>]".into()),
    };
    let seq = Sequence::parse(raw_seq).map_err(|e| e.to_string())?;
    let rate = parse_rate(raw_rate)?;
    let outcome = match seed {
        Some(seed) => mutate_with(&seq, rate, &mut StdRng::seed_from_u64(seed)),
        None => mutate(&seq, rate),
    }
    .map_err(|e| e.to_string())?;
    print_json(&outcome)
}

fn cmd_traits(args: &[String]) -> Result<(), String> {
    let [raw_seq] = args else {
        return Err("Usage: genframes traits <sequence>".into());
    };
    let seq = Sequence::parse(raw_seq).map_err(|e| e.to_string())?;
    let analysis = SequenceAnalysis::of(&seq);
    print_json(&derive_traits(&seq, analysis.gc_content, &analysis.signature))
}
