//! Command-line argument parsing for rtcdbg.
//!
//! Flags override environment variables, which override defaults; see
//! [`PanelConfig`](crate::config::PanelConfig).

use crate::error::ConfigError;
use crate::i18n::Locale;

/// Settings given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub adapter_url: Option<String>,
    pub refresh_ms: Option<u64>,
    pub locale: Option<Locale>,
    /// Use the simulated adapter even if a bridge URL is configured
    pub demo: bool,
    /// Print one snapshot as JSON and exit
    pub once: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the panel (default)
    Run(CliOverrides),
}

/// Usage text printed by `--help`.
pub fn usage() -> &'static str {
    "Usage: rtcdbg [OPTIONS]

Options:
  --adapter <url>     Base URL of the media adapter bridge
  --refresh-ms <n>    Poll period in milliseconds (default 500)
  --locale <en|es>    Label language
  --demo              Use the built-in simulated adapter
  --once              Print one snapshot as JSON and exit
  -V, --version       Print version
  -h, --help          Print this help

Environment:
  RTCDBG_ADAPTER_URL, RTCDBG_REFRESH_MS, RTCDBG_LOCALE, RTCDBG_LOG"
}

fn value<I>(flag: &str, inline: Option<String>, args: &mut I) -> Result<String, ConfigError>
where
    I: Iterator<Item = String>,
{
    inline
        .or_else(|| args.next())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}

/// Parse command-line arguments (program name first).
///
/// ```
/// use rtc_debug_panel::cli::{parse_args, CliCommand};
///
/// let args = vec!["rtcdbg".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ConfigError>
where
    I: Iterator<Item = String>,
{
    let mut overrides = CliOverrides::default();
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        // --flag=value and --flag value are both accepted
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--demo" => overrides.demo = true,
            "--once" => overrides.once = true,
            "--adapter" => overrides.adapter_url = Some(value(&flag, inline, &mut args)?),
            "--refresh-ms" => {
                let raw = value(&flag, inline, &mut args)?;
                let ms = raw
                    .parse::<u64>()
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or(ConfigError::InvalidValue {
                        key: "refresh-ms".to_string(),
                        value: raw,
                    })?;
                overrides.refresh_ms = Some(ms);
            }
            "--locale" => {
                let raw = value(&flag, inline, &mut args)?;
                overrides.locale = Some(raw.parse()?);
            }
            _ => return Err(ConfigError::UnknownArgument(arg)),
        }
    }
    Ok(CliCommand::Run(overrides))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, ConfigError> {
        let args: Vec<String> = std::iter::once("rtcdbg")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        parse_args(args.into_iter())
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]).unwrap(), CliCommand::Run(CliOverrides::default()));
    }

    #[test]
    fn test_parse_version_and_help() {
        assert_eq!(parse(&["-V"]).unwrap(), CliCommand::Version);
        assert_eq!(parse(&["--demo", "--help"]).unwrap(), CliCommand::Help);
    }

    #[test]
    fn test_parse_overrides() {
        let cmd = parse(&[
            "--adapter",
            "http://localhost:4000/rtc",
            "--refresh-ms=250",
            "--locale",
            "es",
            "--once",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            CliCommand::Run(CliOverrides {
                adapter_url: Some("http://localhost:4000/rtc".into()),
                refresh_ms: Some(250),
                locale: Some(Locale::Es),
                demo: false,
                once: true,
            })
        );
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            parse(&["--adapter"]).unwrap_err(),
            ConfigError::MissingValue("--adapter".into())
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            parse(&["--refresh-ms", "0"]).unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));
        assert!(matches!(
            parse(&["--locale", "fr"]).unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_unknown_argument() {
        assert_eq!(
            parse(&["--verbose"]).unwrap_err(),
            ConfigError::UnknownArgument("--verbose".into())
        );
    }
}
