//! Paging Simulator - Main Entry Point
//!
//! Usage: paging-sim [OPTIONS]
//!
//! Options:
//!   -m, --memory-size <N>       Physical memory size in bytes
//!   -p, --page-size <N>         Page (frame) size in bytes
//!   -x, --max-process-size <N>  Largest process size accepted
//!   -n, --max-processes <N>     Process registry capacity
//!   -s, --seed <N>              Seed for simulated process contents
//!       --allow-duplicate-ids   Accept several processes with the same id
//!   -v, --verbose               Log more to stderr (repeat for more detail)
//!   -h, --help                  Print help information
//!
//! Sizes not given on the command line are prompted for.

use std::env;
use std::io;
use std::process;
use std::str::FromStr;

use anyhow::Context;

use paging_sim::constants::MAX_PROCESSES;
use paging_sim::io::{Prompter, run_menu};
use paging_sim::logger::StderrLogger;
use paging_sim::{Session, SimConfig};

/// Command-line configuration
#[derive(Default)]
struct Config {
    memory_size: Option<usize>,
    page_size: Option<usize>,
    max_process_size: Option<usize>,
    max_processes: Option<usize>,
    seed: Option<u64>,
    allow_duplicate_ids: bool,
    verbosity: u8,
}

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = StderrLogger::new(StderrLogger::level_for_verbosity(config.verbosity)).init() {
        eprintln!("Warning: logger unavailable: {}", e);
    }

    if let Err(e) = run(config) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn print_help(program: &str) {
    eprintln!("Paging Simulator - physical memory divided into frames, processes mapped by page tables");
    eprintln!();
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -m, --memory-size <N>       Physical memory size in bytes");
    eprintln!("  -p, --page-size <N>         Page (frame) size in bytes");
    eprintln!("  -x, --max-process-size <N>  Largest process size accepted");
    eprintln!("  -n, --max-processes <N>     Process registry capacity (default {})", MAX_PROCESSES);
    eprintln!("  -s, --seed <N>              Seed for simulated process contents");
    eprintln!("      --allow-duplicate-ids   Accept several processes with the same id");
    eprintln!("  -v, --verbose               Log more to stderr (repeat for more detail)");
    eprintln!("  -h, --help                  Print this help message");
    eprintln!();
    eprintln!("Sizes not given on the command line are prompted for.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} -m 256 -p 16 -x 64", program);
    eprintln!("  {} -vv --seed 7", program);
}

fn parse_value<T: FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("Missing value for {}", flag))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, value))
}

fn parse_args() -> Result<Config, String> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("paging-sim");

    let mut config = Config::default();
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help(program);
                process::exit(0);
            }
            "-m" | "--memory-size" => config.memory_size = Some(parse_value(arg, rest.next())?),
            "-p" | "--page-size" => config.page_size = Some(parse_value(arg, rest.next())?),
            "-x" | "--max-process-size" => config.max_process_size = Some(parse_value(arg, rest.next())?),
            "-n" | "--max-processes" => config.max_processes = Some(parse_value(arg, rest.next())?),
            "-s" | "--seed" => config.seed = Some(parse_value(arg, rest.next())?),
            "--allow-duplicate-ids" => config.allow_duplicate_ids = true,
            "-v" | "--verbose" => config.verbosity = config.verbosity.saturating_add(1),
            "-vv" => config.verbosity = config.verbosity.saturating_add(2),
            "-vvv" => config.verbosity = config.verbosity.saturating_add(3),
            _ => {
                return Err(format!("Unknown option: {}\nUse --help for usage information.", arg));
            }
        }
    }

    Ok(config)
}

/// Main logic separated from main() for cleaner error handling
fn run(config: Config) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    // Step 1: fill in whatever the command line left out
    let memory_size = match config.memory_size {
        Some(n) => n,
        None => prompter
            .ask_positive("Physical memory size: ")
            .context("reading physical memory size")?,
    };
    let page_size = match config.page_size {
        Some(n) => n,
        None => prompter
            .ask_positive("Page (frame) size: ")
            .context("reading page size")?,
    };
    let max_process_size = match config.max_process_size {
        Some(n) => n,
        None => prompter
            .ask_positive("Maximum process size: ")
            .context("reading maximum process size")?,
    };

    // Step 2: build the simulated memory
    let mut sim_config = SimConfig::new(memory_size, page_size, max_process_size)
        .with_duplicate_ids(config.allow_duplicate_ids);
    if let Some(n) = config.max_processes {
        sim_config = sim_config.with_max_processes(n);
    }
    if let Some(seed) = config.seed {
        sim_config = sim_config.with_seed(seed);
    }
    let mut session = Session::new(sim_config).context("failed to start simulation")?;

    // Step 3: serve the menu until exit
    run_menu(&mut session, &mut prompter).context("terminal I/O failed")?;

    Ok(())
}
