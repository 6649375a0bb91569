//! Argument parsing and command execution

use crate::error::CliError;
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use vinorm_core::{NormalizeOptions, Normalizer, RuleFire};

/// Normalize Vietnamese text into a canonical, speakable form
///
/// Reads one UTF-8 text blob, rewrites numbers, dates, currency,
/// abbreviations, acronyms and symbols into words, and emits the
/// sentences joined with the `#line#` delimiter.
#[derive(Debug, Parser)]
#[command(name = "vinorm", version, about)]
pub struct Cli {
    /// Input file (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Keep punctuation in the output
    #[arg(long = "punc")]
    pub punc: bool,

    /// Report tokens that matched neither a rule nor the lexicon
    #[arg(long = "unknown")]
    pub unknown: bool,

    /// Lowercase the output
    #[arg(long = "lower")]
    pub lower: bool,

    /// Report which rules fired on stderr
    #[arg(long = "rule")]
    pub rule: bool,

    /// Format of the fired-rule report
    #[arg(long, value_enum, default_value = "text")]
    pub trace_format: TraceFormat,

    /// Append a terminal period after the final sentence
    #[arg(long)]
    pub terminator: bool,

    /// External data directory (dictionaries plus rule files)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Suppress logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported fired-rule report formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum TraceFormat {
    /// One human-readable line per fired rule
    Text,
    /// A JSON array of fired rules
    Json,
}

impl Cli {
    /// Execute the normalization run
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("starting normalization");
        log::debug!("arguments: {:?}", self);

        let normalizer = self
            .build_normalizer()
            .context("failed to load normalization data")?;
        let text = self.read_input()?;
        let options = self.options();

        let result = normalizer.normalize(&text, &options);

        if self.unknown {
            for token in result.unknown_tokens() {
                log::warn!("unknown token: {token}");
            }
        }
        if self.rule {
            self.report_trace(&result.trace().cloned().collect::<Vec<_>>())?;
        }

        self.write_output(&result.join(&options))
    }

    fn options(&self) -> NormalizeOptions {
        NormalizeOptions::builder()
            .keep_punctuation(self.punc)
            .mark_unknown_tokens(self.unknown)
            .lowercase_output(self.lower)
            .emit_rule_trace(self.rule)
            .trailing_terminator(self.terminator)
            .build()
    }

    fn build_normalizer(&self) -> Result<Normalizer> {
        let normalizer = match &self.data_dir {
            Some(dir) => Normalizer::from_dir(dir)?,
            None => Normalizer::new()?,
        };
        for skipped in normalizer.rules().skipped() {
            log::warn!("{skipped}");
        }
        Ok(normalizer)
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) => {
                if !path.is_file() {
                    return Err(CliError::InputNotFound(path.display().to_string()).into());
                }
                fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))
            }
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read stdin")?;
                Ok(text)
            }
        }
    }

    fn write_output(&self, blob: &str) -> Result<()> {
        match &self.output {
            Some(path) => fs::write(path, blob)
                .map_err(|e| CliError::OutputError(format!("{}: {e}", path.display())).into()),
            None => {
                let mut stdout = std::io::stdout();
                stdout.write_all(blob.as_bytes())?;
                stdout.write_all(b"\n")?;
                stdout.flush()?;
                Ok(())
            }
        }
    }

    fn report_trace(&self, fires: &[RuleFire]) -> Result<()> {
        match self.trace_format {
            TraceFormat::Text => {
                for fire in fires {
                    eprintln!(
                        "rule {}/{}: '{}' -> '{}'",
                        fire.category, fire.priority, fire.matched, fire.rewrite
                    );
                }
            }
            TraceFormat::Json => {
                let json =
                    serde_json::to_string_pretty(fires).context("failed to encode trace")?;
                eprintln!("{json}");
            }
        }
        Ok(())
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init()
                .ok();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_options() {
        let cli = Cli::parse_from(["vinorm", "--punc", "--lower", "--rule"]);
        let options = cli.options();
        assert!(options.keep_punctuation);
        assert!(options.lowercase_output);
        assert!(options.emit_rule_trace);
        assert!(!options.mark_unknown_tokens);
        assert!(!options.trailing_terminator);
    }

    #[test]
    fn test_defaults_are_off() {
        let cli = Cli::parse_from(["vinorm"]);
        let options = cli.options();
        assert!(!options.keep_punctuation);
        assert!(!options.mark_unknown_tokens);
        assert!(!options.lowercase_output);
        assert!(!options.emit_rule_trace);
    }

    #[test]
    fn test_missing_input_file_is_error() {
        let cli = Cli::parse_from(["vinorm", "-i", "/definitely/not/here.txt", "-q"]);
        let err = cli.read_input().unwrap_err();
        assert!(err.to_string().contains("Input not found"));
    }
}
