use rbv_frontend::{InputError, parse_key};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: rbv [OPTIONS] [KEY...]

Inserts integer keys into a red-black tree and shows every rebalancing step.

Options:
      --plain            print each step as text instead of opening the terminal UI
                         (keys are read from stdin, one per line, when none are given)
      --config <PATH>    configuration file to use instead of the search paths
      --log-file <PATH>  write logs to PATH
      --no-animation     jump straight to each step
  -v, --verbose          more logging (-v debug, -vv trace)
  -q, --quiet            less logging (-q errors only, -qq nothing)
  -h, --help             print this help";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("option '{0}' needs a value")]
    MissingValue(String),
    #[error(transparent)]
    Key(#[from] InputError),
}

/// Parsed command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub plain: bool,
    pub config: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    /// Number of `-v` given; `-vv` counts twice
    pub verbose: u8,
    pub quiet: u8,
    pub no_animation: bool,
    pub help: bool,
    pub keys: Vec<i64>,
}

impl CliArgs {
    /// Parses arguments without the program name. Anything that reads as an
    /// integer is a key, so `-5` is never mistaken for a flag.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();
        let mut only_keys = false;

        while let Some(arg) = args.next() {
            let is_option = !only_keys && arg.starts_with('-') && parse_key(&arg).is_err();
            if !is_option {
                parsed.keys.push(parse_key(&arg)?);
                continue;
            }

            match arg.as_str() {
                "--" => only_keys = true,
                "--plain" => parsed.plain = true,
                "--no-animation" => parsed.no_animation = true,
                "--verbose" => parsed.verbose = parsed.verbose.saturating_add(1),
                "--quiet" => parsed.quiet = parsed.quiet.saturating_add(1),
                "-h" | "--help" => parsed.help = true,
                "--config" => parsed.config = Some(Self::value(&arg, args.next())?),
                "--log-file" => parsed.log_file = Some(Self::value(&arg, args.next())?),
                other => match Self::repeated_flag(other) {
                    Some(('v', n)) => parsed.verbose = parsed.verbose.saturating_add(n),
                    Some(('q', n)) => parsed.quiet = parsed.quiet.saturating_add(n),
                    _ => return Err(CliError::UnknownOption(other.to_string())),
                },
            }
        }

        Ok(parsed)
    }

    /// `-v`, `-vvv`, `-qq`: the flag letter and how often it repeats.
    fn repeated_flag(arg: &str) -> Option<(char, u8)> {
        let letters = arg.strip_prefix('-')?;
        let first = letters.chars().next()?;
        if !matches!(first, 'v' | 'q') || letters.chars().any(|c| c != first) {
            return None;
        }
        Some((first, u8::try_from(letters.len()).unwrap_or(u8::MAX)))
    }

    fn value(option: &str, value: Option<String>) -> Result<PathBuf, CliError> {
        value
            .map(PathBuf::from)
            .ok_or_else(|| CliError::MissingValue(option.to_string()))
    }
}
