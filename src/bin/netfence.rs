//! netfence: CLI for loading, checking, and exporting IP block/allow lists.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use netfence::{export, loader, EntrySet, ExportFormat, LoadReport, MembershipIndex};

#[derive(Parser)]
#[command(name = "netfence")]
#[command(version = "0.1.0")]
#[command(about = "Manage and apply IP block/allow lists", long_about = None)]
struct Cli {
    /// Load a specific list file (e.g. malware.txt)
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Load every list file from the blocklist directory
    #[arg(long)]
    load_all: bool,

    /// Check whether addresses are covered by the loaded lists
    #[arg(long, value_name = "IP", num_args = 1..)]
    check: Vec<String>,

    /// Export loaded lists to a file
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Export format: plain, firewall-rules, web-server-config, apache, structured
    #[arg(long, default_value = "plain")]
    format: String,

    /// Print load summary counts
    #[arg(long)]
    stats: bool,

    /// Directory holding the list files
    #[arg(long, value_name = "DIR", default_value = "blocklists")]
    blocklist_dir: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> netfence::Result<()> {
    let (reports, load_failed) = load_lists(cli)?;

    let sets: Vec<EntrySet> = reports.iter().map(|r| r.set.clone()).collect();
    for report in &reports {
        for diagnostic in &report.diagnostics {
            eprintln!("Warning: {}: {}", report.set.name(), diagnostic);
        }
    }

    if !cli.check.is_empty() {
        check_addresses(&sets, &cli.check)?;
    }

    if let Some(output) = &cli.export {
        // Resolve the format before touching the output file, so an unknown
        // name never leaves partial output behind
        let format = ExportFormat::parse(&cli.format)?;
        let text = export::export(&sets, format)?;
        fs::write(output, text)?;
        let total: usize = sets.iter().map(|s| s.len()).sum();
        println!(
            "Exported {} entries to {} ({} format)",
            total,
            output.display(),
            format
        );
    }

    if cli.stats {
        print_stats(&reports);
    }

    if load_failed {
        return Err(netfence::Error::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "one or more list files could not be loaded",
        )));
    }
    Ok(())
}

/// Load the requested lists. With neither --load nor --load-all given, load
/// everything from the blocklist directory.
///
/// Returns the reports plus a flag for unreadable files in a --load-all run,
/// which must turn into a non-zero exit once the other work is done.
fn load_lists(cli: &Cli) -> netfence::Result<(Vec<LoadReport>, bool)> {
    if let Some(file) = &cli.load {
        let path = if file.exists() {
            file.clone()
        } else {
            cli.blocklist_dir.join(file)
        };
        let report = loader::load(&path)?;
        println!("Loaded {} entries from {}", report.set.len(), path.display());
        return Ok((vec![report], false));
    }

    let directory = loader::load_all(&cli.blocklist_dir)?;
    for (path, error) in &directory.failures {
        eprintln!("Warning: {}: {}", path.display(), error);
    }
    println!("Total loaded: {} entries", directory.total_entries());

    let load_failed = !directory.failures.is_empty();
    Ok((directory.reports.into_values().collect(), load_failed))
}

fn check_addresses(sets: &[EntrySet], addresses: &[String]) -> netfence::Result<()> {
    let index = MembershipIndex::build(sets);
    let mut blocked = 0;

    println!("\nChecking addresses against loaded lists:");
    for address in addresses {
        let matches = index.covers(address)?;
        if matches.is_empty() {
            println!("{:40} not blocked", address);
        } else {
            blocked += 1;
            let covering: Vec<String> = matches
                .iter()
                .map(|e| format!("{} [{}]", e.network(), e.source_list()))
                .collect();
            println!("{:40} BLOCKED (matches {})", address, covering.join(", "));
        }
    }
    println!(
        "Total checked: {}, blocked: {}, allowed: {}",
        addresses.len(),
        blocked,
        addresses.len() - blocked
    );
    Ok(())
}

fn print_stats(reports: &[LoadReport]) {
    println!("\nList statistics:");
    let mut totals = (0usize, 0usize, 0usize, 0usize);
    for report in reports {
        let stats = report.stats;
        let (v4, v6) = report.set.family_counts();
        println!(
            "  {}: {} lines, {} entries ({} IPv4, {} IPv6), {} duplicates, {} invalid",
            report.set.name(),
            stats.total_lines,
            stats.valid,
            v4,
            v6,
            stats.duplicates,
            stats.invalid
        );
        totals.0 += stats.valid;
        totals.1 += v4;
        totals.2 += v6;
        totals.3 += stats.invalid;
    }
    println!(
        "  Total: {} entries ({} IPv4, {} IPv6), {} invalid lines",
        totals.0, totals.1, totals.2, totals.3
    );
}
