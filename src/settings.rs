//! Launch settings: ~/.hopper/config.json merged with command-line flags.

use crate::runner::{EngineConfig, EngineOverrides, Variant};
use crate::utils::errors::{ConfigError, ConfigResult};
use crate::utils::persistence::{data_path, load_json_or_default};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "config.json";
pub const DEFAULT_SERVE_PORT: u16 = 3000;

/// Contents of the settings file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub variant: Option<Variant>,
    pub seed: Option<u64>,
    pub log_filter: Option<String>,
    /// Port used by `--serve` when no port is given on the command line.
    pub serve_port: Option<u16>,
    /// Per-field tweaks applied on top of the variant preset.
    pub overrides: EngineOverrides,
}

/// Flags given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub variant: Option<Variant>,
    pub seed: Option<u64>,
    pub config_path: Option<PathBuf>,
    /// `Some(None)` for a bare `--serve`.
    pub serve: Option<Option<u16>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play(CliArgs),
    ListVariants,
    Version,
    Help,
}

/// Everything the host needs to start a game.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchOptions {
    pub variant: Variant,
    pub config: EngineConfig,
    pub seed: Option<u64>,
    pub log_filter: Option<String>,
    pub serve_port: Option<u16>,
}

pub const USAGE: &str = "\
Hopper - terminal endless runner

Usage: hopper [options]

Options:
  --variant=NAME   Rule set: classic, lives, longjump, tophold (default)
  --seed=N         Seed obstacle generation for a repeatable run
  --config=PATH    Settings file (default ~/.hopper/config.json)
  --serve[=PORT]   Also stream the game to a browser (web builds, default port 3000)
  --list-variants  Describe the rule sets
  --version        Show version information
  --help           Show this help message

Controls:
  Space/Up         Jump (hold for a higher jump)
  R                Restart
  Esc/Q            Quit";

/// Parse process arguments (without the program name).
pub fn parse_args<I>(args: I) -> ConfigResult<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();

    for arg in args {
        let (flag, value) = match arg.split_once('=') {
            Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
            None => (arg.clone(), None),
        };

        match (flag.as_str(), value) {
            ("--help" | "-h", None) => return Ok(Command::Help),
            ("--version" | "-v", None) => return Ok(Command::Version),
            ("--list-variants", None) => return Ok(Command::ListVariants),
            ("--variant", Some(name)) => cli.variant = Some(Variant::from_name(&name)?),
            ("--seed", Some(seed)) => {
                let seed = seed
                    .parse()
                    .map_err(|_| ConfigError::argument(&arg, "seed must be a whole number"))?;
                cli.seed = Some(seed);
            }
            ("--config", Some(path)) if !path.is_empty() => {
                cli.config_path = Some(PathBuf::from(path))
            }
            ("--serve", None) => cli.serve = Some(None),
            ("--serve", Some(port)) => {
                let port = port
                    .parse()
                    .map_err(|_| ConfigError::argument(&arg, "port must be 0-65535"))?;
                cli.serve = Some(Some(port));
            }
            _ => return Err(ConfigError::argument(&arg, "unknown option (see --help)")),
        }
    }

    Ok(Command::Play(cli))
}

/// Read the settings file named on the command line, or the default one.
pub fn load_settings(path: Option<&Path>) -> ConfigResult<Settings> {
    match path {
        Some(path) => load_json_or_default(path),
        None => load_json_or_default(&data_path(SETTINGS_FILE)?),
    }
}

/// Merge file settings and flags (flags win) into a validated launch plan.
pub fn resolve(cli: &CliArgs, settings: Settings) -> ConfigResult<LaunchOptions> {
    let variant = cli.variant.or(settings.variant).unwrap_or_default();
    let config = settings.overrides.apply(variant.config());
    config.validate()?;

    let serve_port = cli
        .serve
        .map(|port| port.or(settings.serve_port).unwrap_or(DEFAULT_SERVE_PORT));

    Ok(LaunchOptions {
        variant,
        config,
        seed: cli.seed.or(settings.seed),
        log_filter: settings.log_filter,
        serve_port,
    })
}

/// Text for `--list-variants`.
pub fn variant_listing() -> String {
    Variant::ALL
        .iter()
        .map(|v| format!("  {:<10} {}", v.key(), v.description()))
        .collect::<Vec<_>>()
        .join("\n")
}
