use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clock_core::prelude::*;
use clock_step::{Report, Scenario};

enum RunMode {
    Scenario { path: PathBuf },
    Smoke,
    Ticks { ticks: u64 },
}

struct Options {
    run_mode: RunMode,
    ratio: Option<u32>,
    verbose: bool,
}

fn parse_args() -> Options {
    let mut args = env::args().skip(1);
    let mut scenario: Option<PathBuf> = None;
    let mut smoke = false;
    let mut ticks: Option<u64> = None;
    let mut ratio: Option<u32> = None;
    let mut verbose = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-s" | "--scenario" => {
                let val = args.next().unwrap_or_else(|| {
                    eprintln!("Missing value for --scenario.");
                    print_usage_and_exit();
                });
                scenario = Some(PathBuf::from(val));
            }
            "--smoke" => {
                smoke = true;
            }
            "-t" | "--ticks" => {
                let val = args.next().unwrap_or_default();
                ticks = Some(parse_u64(&val, "ticks"));
            }
            "-r" | "--ratio" => {
                let val = args.next().unwrap_or_default();
                let value = parse_u64(&val, "ratio");
                ratio = Some(u32::try_from(value).unwrap_or_else(|_| {
                    eprintln!("Ratio too large: {val}");
                    print_usage_and_exit();
                }));
            }
            "-v" | "--verbose" => {
                verbose = true;
            }
            "-h" | "--help" => print_usage_and_exit(),
            _ => {
                eprintln!("Unexpected argument: {arg}");
                print_usage_and_exit();
            }
        }
    }

    let modes = usize::from(scenario.is_some()) + usize::from(smoke) + usize::from(ticks.is_some());
    if modes != 1 {
        eprintln!("Provide exactly one of --scenario, --smoke or --ticks.");
        print_usage_and_exit();
    }
    let run_mode = if let Some(path) = scenario {
        RunMode::Scenario { path }
    } else if let Some(ticks) = ticks {
        RunMode::Ticks { ticks }
    } else {
        RunMode::Smoke
    };

    Options {
        run_mode,
        ratio,
        verbose,
    }
}

fn parse_u64(value: &str, name: &str) -> u64 {
    let parsed = match value.strip_prefix("0x").or(value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.replace('_', "").parse::<u64>(),
    };
    parsed.unwrap_or_else(|_| {
        eprintln!("Invalid {name}: {value}");
        print_usage_and_exit();
    })
}

fn print_usage_and_exit() -> ! {
    eprintln!("Usage: bcd-clock --scenario <file.json> [--ratio <ticks/s>] [options]");
    eprintln!("   or: bcd-clock --smoke --ratio <ticks/s> [options]");
    eprintln!("   or: bcd-clock --ticks <count> --ratio <ticks/s> [options]");
    eprintln!("Options:");
    eprintln!("  -s, --scenario <file>   Run a JSON scenario and check its expectations");
    eprintln!("      --smoke             Run the reset / 1 minute / 12 hour bring-up sequence");
    eprintln!("  -t, --ticks <count>     Count ticks from reset and print the time");
    eprintln!("  -r, --ratio <ticks/s>   Ticks per second (overrides the scenario's value)");
    eprintln!("  -v, --verbose           Debug logging (and trace dump with --features tracing)");
    process::exit(2);
}

fn required_ratio(ratio: Option<u32>) -> Result<u32> {
    ratio.context("--ratio is required: the tick-to-second ratio has no default")
}

fn print_report(report: &Report) -> bool {
    println!("{report}");
    report.passed()
}

fn run(opts: &Options) -> Result<bool> {
    match &opts.run_mode {
        RunMode::Scenario { path } => {
            let mut scenario = Scenario::load(path)
                .with_context(|| format!("loading scenario {}", path.display()))?;
            if let Some(ratio) = opts.ratio {
                log::info!("overriding ratio {} -> {ratio}", scenario.ticks_per_second);
                scenario.ticks_per_second = ratio;
            }
            let report = clock_step::run(&scenario)?;
            Ok(print_report(&report))
        }
        RunMode::Smoke => {
            let ratio = required_ratio(opts.ratio)?;
            let report = clock_step::run(&Scenario::smoke(ratio))?;
            Ok(print_report(&report))
        }
        RunMode::Ticks { ticks } => {
            let ratio = required_ratio(opts.ratio)?;
            let mut clock = Clock::new(ClockConfig::new(ratio)?);
            clock.reset();
            let word = clock.config().control_map().encode(ControlInput::RUN);
            let output = clock.run(word, true, *ticks);
            trace_obj!(&clock);
            println!("{}  {output}", clock.time());
            Ok(true)
        }
    }
}

fn main() {
    let opts = parse_args();

    let level = if opts.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let outcome = run(&opts);
    if opts.verbose {
        trace_dump!();
    }

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            log::error!("{err:#}");
            process::exit(2);
        }
    }
}
