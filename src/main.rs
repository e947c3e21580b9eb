mod city;
mod config;
mod csv_loader;
mod errors;
mod stats_reporter;
mod trip_stats;
mod trip_table;
mod user_experience;
mod user_interaction;

use crate::config::{load_settings, resolve_data_dir, CONFIG_FILE_NAME, DATA_DIR_ENV};
use crate::csv_loader::CsvTripSource;
use crate::user_experience::Driver;
use crate::user_interaction::{print_insight, ConsoleInput};
use std::env;
use std::process;

const BRO_VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    println!("Usage: bikebro [--data-dir <dir>] [--version] [--help]");
    println!();
    println!(
        "  --data-dir <dir>  Directory holding the city CSVs and an optional {}",
        CONFIG_FILE_NAME
    );
    println!("                    (defaults to ${}, then the current directory)", DATA_DIR_ENV);
    println!("  --version         Print the version and exit");
    println!("  --help            Print this message and exit");
}

/// Pulls `--data-dir` out of the arguments, in either `--data-dir x` or `--data-dir=x` form.
fn data_dir_arg(args: &[String]) -> Result<Option<String>, String> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--data-dir" {
            return match iter.next() {
                Some(dir) => Ok(Some(dir.clone())),
                None => Err("--data-dir needs a directory".to_string()),
            };
        }
        if let Some(dir) = arg.strip_prefix("--data-dir=") {
            return Ok(Some(dir.to_string()));
        }
    }
    Ok(None)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--version") {
        print_insight(BRO_VERSION);
        process::exit(0);
    }
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        process::exit(0);
    }

    let cli_data_dir = match data_dir_arg(&args) {
        Ok(dir) => dir,
        Err(e) => {
            print_insight(&e);
            print_usage();
            process::exit(2);
        }
    };

    let data_dir = resolve_data_dir(cli_data_dir.as_deref());
    let settings = match load_settings(&data_dir) {
        Ok(settings) => settings,
        Err(e) => {
            print_insight(&format!("Could not read {}: {}", CONFIG_FILE_NAME, e));
            process::exit(1);
        }
    };

    let input = match ConsoleInput::new() {
        Ok(input) => input,
        Err(e) => {
            print_insight(&format!("Failed to initialize editor: {:?}", e));
            process::exit(1);
        }
    };

    println!(
        r#"
    __    _ __        __
   / /_  (_) /_____  / /_  _________
  / __ \/ / //_/ _ \/ __ \/ ___/ __ \
 / /_/ / / ,< /  __/ /_/ / /  / /_/ /
/_.___/_/_/|_|\___/_.___/_/   \____/

  US bikeshare stats, one city at a time.
"#
    );

    let mut driver = Driver::new(input, CsvTripSource { settings });
    driver.run();
}
