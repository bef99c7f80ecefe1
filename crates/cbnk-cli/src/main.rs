//! cbnk - Convert instrument bank dumps into NintendoWare `.cbnk` banks.
//!
//! Reads one Caesar or SoundTool text dump and writes one XML bank next to
//! it (or to `--output`).

mod output;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use cbnk_core::{ConvertConfig, DialectKind};

/// Convert Caesar / SoundTool bank dumps into .cbnk XML banks
#[derive(Parser, Debug)]
#[command(name = "cbnk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert Caesar / SoundTool bank dumps into .cbnk XML banks", long_about = None)]
struct Cli {
    /// Bank dump to convert
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Dialect of the dump
    #[arg(short, long, value_enum, default_value_t = DialectArg::Auto)]
    dialect: DialectArg,

    /// Output file (default: input with `.txt` replaced by the output suffix)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Conversion config file (TOML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DialectArg {
    /// Detect from the dump contents
    Auto,
    /// Caesar dump (`Instrument` blocks of `Key: Value` lines)
    Caesar,
    /// Wii3DSUSoundTool dump (`Key=Value` lines)
    Soundtool,
}

impl DialectArg {
    fn kind(self) -> Option<DialectKind> {
        match self {
            DialectArg::Auto => None,
            DialectArg::Caesar => Some(DialectKind::Caesar),
            DialectArg::Soundtool => Some(DialectKind::SoundTool),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print().ok();
            return ExitCode::from(usage_exit_code(&err));
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// `--help` and `--version` succeed, every usage error exits with 1.
fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Convert the input file, returning the path written.
fn run(cli: &Cli) -> Result<PathBuf> {
    let config = match &cli.config {
        Some(path) => ConvertConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ConvertConfig::default(),
    };

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| output::derive_output_path(&cli.input, &config.output_suffix));

    log::info!("Input:  {}", cli.input.display());
    log::info!("Output: {}", output.display());

    let dialect = cbnk_core::convert_file(&cli.input, &output, cli.dialect.kind(), &config)
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;

    log::info!("Wrote {} bank to {}", dialect, output.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CAESAR_BANK: &str = "Instrument 3\nNote Count: 1\nSample: kick\nStart Note: 0\nEnd Note: 60\n";

    fn cli(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("cbnk").chain(args.iter().copied()))
    }

    #[test]
    fn test_missing_or_extra_arguments_exit_with_one() {
        let err = cli(&[]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 1);

        let err = cli(&["a.txt", "b.txt"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 1);
    }

    #[test]
    fn test_help_exits_with_zero() {
        let err = cli(&["--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 0);
    }

    #[test]
    fn test_parse_arguments() {
        let args = cli(&["bank.txt"]).unwrap();
        assert_eq!(args.input, PathBuf::from("bank.txt"));
        assert_eq!(args.dialect, DialectArg::Auto);
        assert!(args.output.is_none());

        let args = cli(&["bank.txt", "--dialect", "soundtool", "-o", "out.cbnk"]).unwrap();
        assert_eq!(args.dialect.kind(), Some(DialectKind::SoundTool));
        assert_eq!(args.output, Some(PathBuf::from("out.cbnk")));
    }

    #[test]
    fn test_run_writes_derived_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("drums.txt");
        fs::write(&input, CAESAR_BANK).unwrap();

        let args = cli(&[input.to_str().unwrap()]).unwrap();
        let output = run(&args).unwrap();

        assert_eq!(output, dir.path().join("drums_output.cbnk"));
        let xml = fs::read_to_string(&output).unwrap();
        assert!(xml.contains("<Title>TestBank</Title>"));
        assert!(xml.contains("<FilePath>kick.wav</FilePath>"));
    }

    #[test]
    fn test_run_uses_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("drums.txt");
        let config = dir.path().join("cbnk.toml");
        fs::write(&input, CAESAR_BANK).unwrap();
        fs::write(&config, "title = \"Drums\"\noutput_suffix = \".cbnk\"\n").unwrap();

        let args = cli(&[input.to_str().unwrap(), "--config", config.to_str().unwrap()]).unwrap();
        let output = run(&args).unwrap();

        assert_eq!(output, dir.path().join("drums.cbnk"));
        assert!(fs::read_to_string(&output).unwrap().contains("<Title>Drums</Title>"));
    }

    #[test]
    fn test_run_fails_on_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.txt");

        let args = cli(&[input.to_str().unwrap()]).unwrap();
        let err = run(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("IO error"));
        assert!(!dir.path().join("missing_output.cbnk").exists());
    }

    #[test]
    fn test_run_forced_dialect_skips_foreign_lines() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("drums.txt");
        fs::write(&input, CAESAR_BANK).unwrap();

        // Caesar lines carry no '=' so SoundTool reads an empty bank.
        let args = cli(&[input.to_str().unwrap(), "--dialect", "soundtool"]).unwrap();
        let output = run(&args).unwrap();
        let xml = fs::read_to_string(&output).unwrap();
        assert!(!xml.contains("<Instrument "));
        assert!(xml.contains("<Items/>"));
    }

    #[test]
    fn test_run_reports_malformed_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("piano.txt");
        fs::write(&input, "InstrumentName=Piano\n").unwrap();

        let args = cli(&[input.to_str().unwrap()]).unwrap();
        let err = run(&args).unwrap_err();
        let err = err.downcast_ref::<cbnk_core::Error>().unwrap();
        assert!(err.is_malformed_input());
        assert!(!dir.path().join("piano_output.cbnk").exists());
    }
}
