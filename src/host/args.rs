//! Command-line parsing for the terminal host.

use std::path::PathBuf;

pub const USAGE: &str = "\
Dino Jockey - two-player endless runner

Usage: dino-jockey [options]

Options:
  --config <path>  Load gameplay settings from a JSON file
  --seed <n>       Seed obstacle timing for a reproducible match
  --mute           Do not ring the terminal bell
  --version        Show version information
  --help           Show this help message

Controls:
  Player 1: Up     Player 2: W     Quit: Esc";

/// Options for a match run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub mute: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    Version,
    Help,
}

/// Parse the arguments after the program name.
pub fn parse<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = RunOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--mute" => options.mute = true,
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                options.config = Some(PathBuf::from(path));
            }
            "--seed" => {
                let value = args.next().ok_or("--seed needs a number")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }
    Ok(Command::Run(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_runs_with_defaults() {
        assert_eq!(parse(args(&[])), Ok(Command::Run(RunOptions::default())));
    }

    #[test]
    fn test_full_run_options() {
        let parsed = parse(args(&["--config", "dino.json", "--seed", "7", "--mute"]));
        assert_eq!(
            parsed,
            Ok(Command::Run(RunOptions {
                config: Some(PathBuf::from("dino.json")),
                seed: Some(7),
                mute: true,
            }))
        );
    }

    #[test]
    fn test_version_and_help_short_circuit() {
        assert_eq!(parse(args(&["--mute", "--version"])), Ok(Command::Version));
        assert_eq!(parse(args(&["-h", "--bogus"])), Ok(Command::Help));
    }

    #[test]
    fn test_errors() {
        assert!(parse(args(&["--seed"])).is_err());
        assert!(parse(args(&["--seed", "abc"])).is_err());
        assert!(parse(args(&["--config"])).is_err());
        assert_eq!(
            parse(args(&["update"])),
            Err("Unknown option: update".to_string())
        );
    }
}
