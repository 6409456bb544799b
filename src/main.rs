//! wellform - drilling form validation harness
//!
//! Runs the form validators and calculators from the command line and prints
//! JSON to stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Validate a hole-section snapshot, with display-formatted numbers
//! wellform section snapshot.json --display
//!
//! # Canonicalize a well name and check its key suffix
//! wellform canon "Yapraklı - 4s" --check-key
//!
//! # Nozzle TFA for 3x12 + 2x14
//! wellform tfa 3x12 2x14
//!
//! # Option lists offered by the form, with an explicit config file
//! wellform --config ./site.toml options
//! ```
//!
//! # Environment Variables
//!
//! - `WELLFORM_CONFIG`: Path to the TOML config, same as `--config` (default: ./wellform.toml)
//! - `RUST_LOG`: Logging filter, overrides `[logging] level`

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{debug, info, warn};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use wellform::calculations::{gauge_from_fraction, nozzle_summary, tfa_from_nozzles};
use wellform::canonical::{canonical_text, derive_field_name_from_well_key, is_well_key_format_ok};
use wellform::config::{self, FormConfig, CONFIG_ENV_VAR};
use wellform::parsing::normalize_hhmm;
use wellform::rules::options::option_catalog;
use wellform::rules::{step1, step2};
use wellform::{
    known_section_keys, validate_hole_section, validate_step1, validate_step2, FormInput,
    NozzleLine,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wellform")]
#[command(about = "Drilling data-entry validation and derived values")]
#[command(version)]
struct CliArgs {
    /// TOML config file (falls back to ./wellform.toml, then built-in defaults)
    #[arg(long, global = true, env = CONFIG_ENV_VAR, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(Subcommand, Debug)]
enum SubCommand {
    /// Validate a hole-section snapshot (JSON object of form keys)
    Section {
        file: PathBuf,
        /// Also render computed values with the configured decimals
        #[arg(long)]
        display: bool,
    },
    /// Validate the well identity step
    Identity { file: PathBuf },
    /// Validate the planned/actual trajectory step
    Trajectory { file: PathBuf },
    /// Canonicalize identifier text
    Canon {
        text: String,
        /// Also derive the field name from the text as a well key
        #[arg(long)]
        field_name: bool,
        /// Also check the well-key suffix format
        #[arg(long)]
        check_key: bool,
    },
    /// Normalize an HH:MM time entry
    Time { raw: String },
    /// Total flow area for nozzle lines given as COUNTxSIZE (size in 32nds)
    Tfa {
        #[arg(required = true, value_name = "COUNTxSIZE")]
        nozzles: Vec<String>,
    },
    /// Stabilizer gauge from whole inches plus a fraction
    Gauge {
        whole: u32,
        numerator: u32,
        denominator: u32,
    },
    /// Print every fixed option list (well types, brands, casing table, ...)
    Options,
}

// ============================================================================
// Helpers
// ============================================================================

/// Plain-text subscriber used only while the config itself is loading.
fn bootstrap_subscriber<W>(filter: EnvFilter, writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer)
        .finish()
}

/// Load the config with its own warnings routed to `writer`, before the
/// configured subscriber exists.
fn load_config<W>(explicit: Option<&Path>, filter: EnvFilter, writer: W) -> FormConfig
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing::subscriber::with_default(bootstrap_subscriber(filter, writer), || {
        FormConfig::load_with_override(explicit)
    })
}

fn init_logging(config: &FormConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_snapshot(path: &Path, known: &HashSet<&str>) -> Result<FormInput> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let input = FormInput::from_json_str(&raw)
        .with_context(|| format!("Invalid snapshot {}", path.display()))?;
    debug!(path = %path.display(), keys = input.len(), "snapshot loaded");

    if config::get().input.warn_unknown_keys {
        for w in input.unknown_keys(known) {
            warn!(key = %w.field, "{}", w);
        }
    }
    Ok(input)
}

fn parse_nozzle_arg(arg: &str) -> Result<NozzleLine> {
    let Some((count, size)) = arg.split_once(|c: char| c == 'x' || c == 'X') else {
        bail!("Nozzle '{arg}' must be COUNTxSIZE (e.g. 3x12)");
    };
    let count = count.trim().parse::<i64>().with_context(|| format!("Bad nozzle count in '{arg}'"))?;
    let size = size.trim().parse::<i64>().with_context(|| format!("Bad nozzle size in '{arg}'"))?;
    Ok(NozzleLine::new(count, size))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_status(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<ExitCode> {
    let args = CliArgs::parse();

    let bootstrap_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let form_config = load_config(args.config.as_deref(), bootstrap_filter, std::io::stderr);
    init_logging(&form_config);
    config::init(form_config);

    match args.command {
        SubCommand::Section { file, display } => {
            let input = read_snapshot(&file, &known_section_keys())?;
            let result = validate_hole_section(&input);
            info!(ok = result.ok(), errors = result.errors().len(), "hole section validated");

            let mut out = serde_json::to_value(&result)?;
            if display {
                out["display"] =
                    serde_json::to_value(result.computed().display_map(config::get().decimals()))?;
            }
            print_json(&out)?;
            Ok(exit_status(result.ok()))
        }
        SubCommand::Identity { file } => {
            let known: HashSet<&str> = step1::REQUIRED_FIELDS
                .iter()
                .map(|(key, _)| *key)
                .chain(["well_key"])
                .collect();
            let result = validate_step1(&read_snapshot(&file, &known)?);
            print_json(&serde_json::to_value(&result)?)?;
            Ok(exit_status(result.ok()))
        }
        SubCommand::Trajectory { file } => {
            let known: HashSet<&str> = step2::trajectory_keys().collect();
            let result = validate_step2(&read_snapshot(&file, &known)?);
            print_json(&serde_json::to_value(&result)?)?;
            Ok(exit_status(result.ok()))
        }
        SubCommand::Canon {
            text,
            field_name,
            check_key,
        } => {
            let canonical = canonical_text(&text);
            let mut out = json!({ "canonical": canonical });
            if field_name {
                out["field_name"] = json!(derive_field_name_from_well_key(&text));
            }
            let mut ok = true;
            if check_key {
                ok = is_well_key_format_ok(&canonical);
                out["key_format_ok"] = json!(ok);
            }
            print_json(&out)?;
            Ok(exit_status(ok))
        }
        SubCommand::Time { raw } => {
            let (out, ok) = match normalize_hhmm(&raw) {
                Ok(time) => (json!({ "ok": true, "time": time }), true),
                Err(e) => (json!({ "ok": false, "error": e.to_string() }), false),
            };
            print_json(&out)?;
            Ok(exit_status(ok))
        }
        SubCommand::Tfa { nozzles } => {
            let lines = nozzles
                .iter()
                .map(|arg| parse_nozzle_arg(arg))
                .collect::<Result<Vec<_>>>()?;
            let (out, ok) = match tfa_from_nozzles(&lines) {
                Ok(tfa) => (
                    json!({ "ok": true, "tfa_in2": tfa, "summary": nozzle_summary(&lines) }),
                    true,
                ),
                Err(e) => (json!({ "ok": false, "error": e.to_string() }), false),
            };
            print_json(&out)?;
            Ok(exit_status(ok))
        }
        SubCommand::Gauge {
            whole,
            numerator,
            denominator,
        } => {
            let (out, ok) = match gauge_from_fraction(whole, numerator, denominator) {
                Ok(gauge) => (json!({ "ok": true, "gauge_in": gauge }), true),
                Err(e) => (json!({ "ok": false, "error": e.to_string() }), false),
            };
            print_json(&out)?;
            Ok(exit_status(ok))
        }
        SubCommand::Options => {
            print_json(&serde_json::to_value(option_catalog())?)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// In-memory log sink for the bootstrap subscriber.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn test_parse_nozzle_arg() {
        assert_eq!(parse_nozzle_arg("3x12").unwrap(), NozzleLine::new(3, 12));
        assert_eq!(parse_nozzle_arg(" 2X14 ").unwrap(), NozzleLine::new(2, 14));
        assert!(parse_nozzle_arg("3-12").is_err());
        assert!(parse_nozzle_arg("ax12").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let args = CliArgs::try_parse_from(["wellform", "gauge", "12", "1", "8"]).unwrap();
        assert!(matches!(
            args.command,
            SubCommand::Gauge { whole: 12, numerator: 1, denominator: 8 }
        ));
        let args = CliArgs::try_parse_from(["wellform", "section", "s.json", "--display"]).unwrap();
        assert!(matches!(args.command, SubCommand::Section { display: true, .. }));
        assert!(CliArgs::try_parse_from(["wellform", "tfa"]).is_err());
    }

    #[test]
    fn test_config_flag_is_global() {
        let args =
            CliArgs::try_parse_from(["wellform", "options", "--config", "site.toml"]).unwrap();
        assert!(matches!(args.command, SubCommand::Options));
        assert_eq!(args.config.as_deref(), Some(Path::new("site.toml")));

        let args = CliArgs::try_parse_from(["wellform", "--config", "a.toml", "time", "1630"]).unwrap();
        assert_eq!(args.config.as_deref(), Some(Path::new("a.toml")));
    }

    #[test]
    fn test_config_warnings_reach_the_log() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[display]\ndecimal = 3\n[logging]\nlevel = \"loud\"\n").unwrap();

        let sink = Captured::default();
        let writer = sink.clone();
        let config = load_config(Some(file.path()), EnvFilter::new("info"), move || writer.clone());

        let logged = sink.text();
        assert!(logged.contains("did you mean 'display.decimals'"), "{logged}");
        assert!(logged.contains("falling back"), "{logged}");
        assert!(logged.contains("logging.level"), "{logged}");
        assert_eq!(config.decimals(), FormConfig::default().decimals());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_config_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Captured::default();
        let writer = sink.clone();
        let missing = dir.path().join("absent.toml");
        load_config(Some(&missing), EnvFilter::new("warn"), move || writer.clone());

        let logged = sink.text();
        assert!(logged.contains("Config file does not exist"), "{logged}");
        assert!(logged.contains("absent.toml"), "{logged}");
    }
}
