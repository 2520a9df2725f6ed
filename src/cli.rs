use std::env;
use std::path::PathBuf;

use crate::devices::Season;

/// Which seasons to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonSelection {
    Winter,
    Summer,
    #[default]
    Both,
}

impl SeasonSelection {
    /// The seasons covered by this selection, in reporting order.
    pub fn seasons(self) -> Vec<Season> {
        match self {
            SeasonSelection::Winter => vec![Season::Winter],
            SeasonSelection::Summer => vec![Season::Summer],
            SeasonSelection::Both => Season::ALL.to_vec(),
        }
    }
}

#[derive(Debug)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub weather: Option<PathBuf>,
    pub threshold_override: Option<f32>,
    pub season: SeasonSelection,
    pub telemetry_out: Option<PathBuf>,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut scenario = None;
    let mut preset = None;
    let mut weather = None;
    let mut threshold_override = None;
    let mut season = SeasonSelection::Both;
    let mut telemetry_out = None;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --scenario (expected a TOML file path)".to_string()
                })?;
                if scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.get(i).ok_or_else(|| {
                    "missing value for --preset (expected a preset name)".to_string()
                })?;
                if preset.replace(name.clone()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--weather" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --weather (expected a CSV file path)".to_string()
                })?;
                if weather.replace(PathBuf::from(path)).is_some() {
                    return Err("--weather provided more than once".to_string());
                }
            }
            "--threshold" => {
                i += 1;
                let raw = args.get(i).ok_or_else(|| {
                    "missing value for --threshold (expected kW as a number)".to_string()
                })?;
                let value: f32 = raw
                    .parse()
                    .map_err(|_| format!("--threshold value \"{raw}\" is not a number"))?;
                if threshold_override.replace(value).is_some() {
                    return Err("--threshold provided more than once".to_string());
                }
            }
            "--season" => {
                i += 1;
                let name = args.get(i).ok_or_else(|| {
                    "missing value for --season (expected winter, summer, or both)".to_string()
                })?;
                season = match name.as_str() {
                    "winter" => SeasonSelection::Winter,
                    "summer" => SeasonSelection::Summer,
                    "both" => SeasonSelection::Both,
                    other => {
                        return Err(format!(
                            "invalid --season \"{other}\" (expected winter, summer, or both)"
                        ));
                    }
                };
            }
            "--telemetry-out" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    "missing value for --telemetry-out (expected a file path)".to_string()
                })?;
                if telemetry_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--telemetry-out provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if scenario.is_some() && preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(CliOptions {
        scenario,
        preset,
        weather,
        threshold_override,
        season,
        telemetry_out,
    })
}

pub fn print_usage() {
    eprintln!("peakshift — household battery peak shaving and load shifting");
    eprintln!();
    eprintln!("Usage: peakshift [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from a TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, pv_heavy, tight_grid)");
    eprintln!("  --weather <path>         Read per-season irradiance from a CSV file");
    eprintln!("  --threshold <kw>         Override the peak-hour demand threshold");
    eprintln!("  --season <name>          Analyze winter, summer, or both (default: both)");
    eprintln!("  --telemetry-out <path>   Export hourly profiles to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}
