use std::env;
use std::path::{Path, PathBuf};
use std::process;

use iads_network::{
    IadsError, IadsNetwork, NetworkConfig, Scenario, Side, DEFAULT_CONFIG_FILE_NAME,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    scenario: PathBuf,
    config: Option<PathBuf>,
    side: Option<Side>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_options(args.iter().skip(1).map(|arg| arg.as_str())) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            print_help();
            process::exit(1);
        }
    };

    let config = match load_config(options.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load iads config: {err}");
            process::exit(1);
        }
    };
    let scenario = match Scenario::from_path(&options.scenario) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("failed to load scenario: {err}");
            process::exit(1);
        }
    };

    let mut network = IadsNetwork::from_config(&config);
    network.initialize(scenario.installations);

    let side = options.side;
    let snapshot = match network.project(|installation| {
        side.is_some_and(|side| installation.side != side)
    }) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            eprintln!("failed to project iads network: {err}");
            process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("failed to encode snapshot: {err}");
            process::exit(1);
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<NetworkConfig, IadsError> {
    if let Some(path) = path {
        return NetworkConfig::from_path(path);
    }
    let default_path = Path::new(DEFAULT_CONFIG_FILE_NAME);
    if default_path.exists() {
        return NetworkConfig::from_path(default_path);
    }
    Ok(NetworkConfig::default())
}

fn parse_side(raw: &str) -> Option<Side> {
    match raw {
        "blue" => Some(Side::Blue),
        "red" => Some(Side::Red),
        "neutral" => Some(Side::Neutral),
        _ => None,
    }
}

fn parse_options<'a>(args: impl Iterator<Item = &'a str>) -> Result<CliOptions, String> {
    let mut scenario: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;
    let mut side: Option<Side> = None;

    let mut iter = args.peekable();
    while let Some(arg) = iter.next() {
        match arg {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                let raw = iter
                    .next()
                    .ok_or_else(|| "--config requires a file path".to_string())?;
                config = Some(PathBuf::from(raw));
            }
            "--side" => {
                let raw = iter
                    .next()
                    .ok_or_else(|| "--side requires blue, red or neutral".to_string())?;
                side = Some(
                    parse_side(raw).ok_or_else(|| format!("unknown side: {raw}"))?,
                );
            }
            "--scenario" => {
                let raw = iter
                    .next()
                    .ok_or_else(|| "--scenario requires a file path".to_string())?;
                scenario = Some(PathBuf::from(raw));
            }
            _ => {
                if scenario.is_none() {
                    scenario = Some(PathBuf::from(arg));
                } else {
                    return Err(format!("unexpected argument: {arg}"));
                }
            }
        }
    }

    let scenario = scenario.ok_or_else(|| "missing scenario file".to_string())?;
    Ok(CliOptions {
        scenario,
        config,
        side,
    })
}

fn print_help() {
    println!("Usage: iads_network_demo <scenario.json> [--config <iads.toml>] [--side <side>]");
    println!("Options:");
    println!("  --scenario <path>  Installation list exported by the campaign loader");
    println!(
        "  --config <path>    Network config (default: ./{DEFAULT_CONFIG_FILE_NAME} if present)"
    );
    println!("  --side <side>      Only export installations of this side (blue, red, neutral)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_options_requires_scenario() {
        let err = parse_options([].into_iter()).expect_err("missing scenario");
        assert!(err.contains("missing scenario"));
    }

    #[test]
    fn parse_options_accepts_positional_scenario() {
        let options = parse_options(["theater.json"].into_iter()).expect("scenario");
        assert_eq!(options.scenario, PathBuf::from("theater.json"));
        assert_eq!(options.config, None);
        assert_eq!(options.side, None);
    }

    #[test]
    fn parse_options_accepts_config_and_side() {
        let options = parse_options(
            ["--scenario", "theater.json", "--config", "iads.toml", "--side", "red"].into_iter(),
        )
        .expect("options");
        assert_eq!(options.config, Some(PathBuf::from("iads.toml")));
        assert_eq!(options.side, Some(Side::Red));
    }

    #[test]
    fn parse_options_rejects_unknown_side() {
        let err = parse_options(["theater.json", "--side", "green"].into_iter())
            .expect_err("reject side");
        assert!(err.contains("unknown side"));
    }

    #[test]
    fn parse_options_rejects_extra_positional() {
        let err = parse_options(["a.json", "b.json"].into_iter()).expect_err("reject extra");
        assert!(err.contains("unexpected argument"));
    }
}
