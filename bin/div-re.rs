use dfa_regex::prelude::*;

use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("div-re")
    .about("Prints a regular expression matching the numerals that are divisible by a given number")
    .arg(
        Arg::new("modulus")
        .required(true)
        .value_parser(value_parser!(u32).range(1..))
        .help("the divisor, must be positive")
    )
    .arg(
        Arg::new("base")
        .short('b')
        .long("base")
        .default_value("10")
        .value_parser(value_parser!(u32).range(2..=36))
        .help("the base in which numerals are written")
    )
    .arg(
        Arg::new("table")
        .long("table")
        .action(ArgAction::SetTrue)
        .help("print the transition table of the minimized automaton instead of the pattern")
    )
    .arg(
        Arg::new("no-minimize")
        .long("no-minimize")
        .action(ArgAction::SetTrue)
        .help("eliminate states of the automaton as built, without minimizing it first")
    )
    .arg(
        Arg::new("verbosity")
        .short('v')
        .long("verbosity")
        .num_args(0..=1)
        .require_equals(true)
        .value_parser(["info", "debug", "trace"])
        .default_missing_value("info")
    )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn pattern(dfa: &DFA, minimize: bool) -> Result<String, Error> {
    let regex = if minimize {
        dfa.to_regex()?
    } else {
        dfa.to_regex_unminimized()?
    };
    info!("produced expression with {} nodes", regex.node_count());
    Ok(regex.to_anchored_pattern()?)
}

pub fn main() {
    let matches = cli().get_matches();

    setup_logging(&matches);

    let modulus = *matches
        .get_one::<u32>("modulus")
        .expect("modulus is a required argument");
    let base = *matches
        .get_one::<u32>("base")
        .expect("base has a default value");

    let dfa = divisibility::divisible_by_in_base(modulus, base);
    debug!("built divisibility automaton with {} states", dfa.size());

    if matches.get_flag("table") {
        let minimal = dfa.minimize();
        info!("minimized automaton has {} states", minimal.size());
        println!("{}", minimal.transition_table());
        return;
    }

    let start = std::time::Instant::now();
    match pattern(&dfa, !matches.get_flag("no-minimize")) {
        Ok(pattern) => {
            info!(
                "computing a pattern of length {} took {}µs",
                pattern.len(),
                start.elapsed().as_micros()
            );
            println!("{pattern}");
        }
        Err(err) => {
            error!("could not compute pattern: {err}");
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
