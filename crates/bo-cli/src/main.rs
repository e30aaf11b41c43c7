//! BetsOff CLI
//!
//! CLI tool for compiling domain lists into rule documents and
//! building, inspecting, and querying filter snapshots.

use std::fs;
use std::io::Write;
use std::time::Instant;

use clap::{Parser, Subcommand};

use bo_compiler::{compile_rules, CompileError};
use bo_core::bloom::{BloomFilter, DEFAULT_HASH_FUNCTIONS, DEFAULT_SIZE};
use bo_core::classify::{Classifier, PatternClassifier, RequestClass};
use bo_core::snapshot;

#[derive(Parser)]
#[command(name = "bo-cli")]
#[command(about = "BetsOff domain-list compiler and filter tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a domain list into a rule document
    Compile {
        /// Input domain list file
        #[arg(short, long)]
        input: String,

        /// Output rule document file
        #[arg(short, long, default_value = "rules.json")]
        output: String,
    },

    /// Build a filter snapshot from a domain list
    BuildFilter {
        /// Input domain list file
        #[arg(short, long)]
        input: String,

        /// Output snapshot file
        #[arg(short, long, default_value = "filter.bof")]
        output: String,

        /// Filter width in bits
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: u32,

        /// Hash derivations per key
        #[arg(long, default_value_t = DEFAULT_HASH_FUNCTIONS)]
        hash_functions: u32,
    },

    /// Test a hostname against a filter snapshot
    Query {
        /// Snapshot file
        #[arg(short, long)]
        snapshot: String,

        /// Hostname to test
        host: String,
    },

    /// Dump snapshot info
    Info {
        /// Snapshot file to inspect
        #[arg(short, long)]
        snapshot: String,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile { input, output } => cmd_compile(&input, &output),
        Commands::BuildFilter {
            input,
            output,
            size,
            hash_functions,
        } => cmd_build_filter(&input, &output, size, hash_functions),
        Commands::Query { snapshot, host } => cmd_query(&snapshot, &host),
        Commands::Info { snapshot } => cmd_info(&snapshot),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Read the domain list, surfacing failures as the loader-seam error.
fn load_domain_list(path: &str) -> Result<String, String> {
    fs::read_to_string(path)
        .map_err(CompileError::from)
        .map_err(|e| format!("failed to load '{path}': {e}"))
}

fn cmd_compile(input: &str, output: &str) -> Result<(), String> {
    let start = Instant::now();

    let text = load_domain_list(input)?;
    let line_count = text.lines().count();

    let document = compile_rules(&text);
    let json = document.to_json_bytes();

    let mut file =
        fs::File::create(output).map_err(|e| format!("failed to create '{output}': {e}"))?;
    file.write_all(&json)
        .map_err(|e| format!("failed to write '{output}': {e}"))?;

    println!("Compiled '{input}' to '{output}'");
    println!("  Lines:    {line_count}");
    println!("  Rules:    {}", document.rules.len());
    println!("  Size:     {} bytes", json.len());
    println!("  Time:     {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);

    Ok(())
}

fn cmd_build_filter(
    input: &str,
    output: &str,
    size: u32,
    hash_functions: u32,
) -> Result<(), String> {
    let start = Instant::now();

    let text = load_domain_list(input)?;
    let domains = bo_compiler::parse_domain_list(&text);

    let mut filter = BloomFilter::new(size, hash_functions)
        .map_err(|e| format!("cannot build filter: {e}"))?;
    filter.insert_all(&domains);

    log::debug!(
        "inserted {} domains into a {}-bit filter",
        domains.len(),
        filter.size()
    );

    let bytes = snapshot::encode(&filter);
    snapshot::decode(&bytes)
        .map_err(|e| format!("generated snapshot failed validation: {e}"))?;

    let mut file =
        fs::File::create(output).map_err(|e| format!("failed to create '{output}': {e}"))?;
    file.write_all(&bytes)
        .map_err(|e| format!("failed to write '{output}': {e}"))?;

    println!("Built filter snapshot '{output}' from '{input}'");
    println!("  Domains:  {}", domains.len());
    println!("  Bits:     {} ({} bytes)", filter.size(), filter.as_bytes().len());
    println!("  Hashes:   {}", filter.hash_functions());
    println!(
        "  Est. FP:  {:.4}%",
        filter.estimated_fp_rate(domains.len() as u64) * 100.0
    );
    println!("  Time:     {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);

    Ok(())
}

fn cmd_query(snapshot_path: &str, host: &str) -> Result<(), String> {
    let bytes =
        fs::read(snapshot_path).map_err(|e| format!("failed to read '{snapshot_path}': {e}"))?;
    let filter =
        snapshot::decode(&bytes).map_err(|e| format!("invalid snapshot: {e}"))?;

    if filter.test(host) {
        println!("'{host}' is possibly blocked");
    } else {
        println!("'{host}' is not blocked");
    }

    match PatternClassifier.classify(host) {
        Some(RequestClass::Ad) => println!("  Class:   ad"),
        Some(RequestClass::Tracker) => println!("  Class:   tracker"),
        None => {}
    }

    Ok(())
}

fn cmd_info(snapshot_path: &str) -> Result<(), String> {
    let bytes =
        fs::read(snapshot_path).map_err(|e| format!("failed to read '{snapshot_path}': {e}"))?;
    let filter =
        snapshot::decode(&bytes).map_err(|e| format!("invalid snapshot: {e}"))?;

    let set = filter.set_bits();
    let load = set as f64 / filter.size() as f64;

    println!("Snapshot: {snapshot_path}");
    println!("  Magic:      BOF1");
    println!("  Version:    {}", snapshot::BOF_VERSION);
    println!("  Bits:       {} ({} bytes)", filter.size(), filter.as_bytes().len());
    println!("  Hashes:     {}", filter.hash_functions());
    println!("  Set bits:   {set} ({:.2}% load)", load * 100.0);

    Ok(())
}
