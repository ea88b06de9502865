//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options, convertible into
//!   [`crate::format::OutputFormat`]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// File stem used when `--output` is not given; the extension follows `--format`.
pub const DEFAULT_OUTPUT_STEM: &str = "chat_history";

/// Turn a raw chat export into structured message records.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatsift")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatsift data/raw/_chat.txt
    chatsift _chat.txt -o data/processed/chat_history.csv
    chatsift _chat.txt --format jsonl --preview 10
    chatsift _chat.txt --denylist placeholders.json
    chatsift --print-denylist > placeholders.json")]
pub struct Args {
    /// Path to the chat export
    #[arg(required_unless_present = "print_denylist")]
    pub input: Option<String>,

    /// Path to output file [default: chat_history.<format extension>]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// JSON file replacing the built-in placeholder denylist
    #[arg(long, value_name = "FILE")]
    pub denylist: Option<PathBuf>,

    /// Read the export line by line instead of loading it whole
    #[arg(long)]
    pub streaming: bool,

    /// Number of records to preview after writing
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub preview: usize,

    /// Print the built-in denylist as JSON and exit
    #[arg(long)]
    pub print_denylist: bool,
}

impl Args {
    /// The `--output` path as given, or the default name for the format.
    pub fn output_path(&self) -> String {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let lib_format: crate::format::OutputFormat = self.format.into();
                format!("{DEFAULT_OUTPUT_STEM}.{}", lib_format.extension())
            }
        }
    }
}

/// Output format options.
///
/// ```rust
/// use chatsift::cli::OutputFormat;
///
/// let format = OutputFormat::Jsonl;
/// assert_eq!(format.to_string(), "JSONL");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// JSON array of records
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::format::OutputFormat::from(*self).fmt(f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_minimal() {
        let args = Args::try_parse_from(["chatsift", "_chat.txt"]).unwrap();
        assert_eq!(args.input.as_deref(), Some("_chat.txt"));
        assert!(args.output.is_none());
        assert_eq!(args.output_path(), "chat_history.csv");
        assert_eq!(args.format, OutputFormat::Csv);
        assert_eq!(args.preview, 5);
        assert!(!args.streaming);
        assert!(args.denylist.is_none());
    }

    #[test]
    fn test_args_input_required() {
        assert!(Args::try_parse_from(["chatsift"]).is_err());
    }

    #[test]
    fn test_args_print_denylist_without_input() {
        let args = Args::try_parse_from(["chatsift", "--print-denylist"]).unwrap();
        assert!(args.print_denylist);
        assert!(args.input.is_none());
    }

    #[test]
    fn test_output_path_follows_format() {
        let args = Args::try_parse_from(["chatsift", "in.txt", "-f", "jsonl"]).unwrap();
        assert_eq!(args.output_path(), "chat_history.jsonl");

        let args =
            Args::try_parse_from(["chatsift", "in.txt", "-f", "json", "-o", "out.data"]).unwrap();
        assert_eq!(args.output_path(), "out.data");
    }

    #[test]
    fn test_explicit_output_is_kept_even_if_it_looks_like_the_default() {
        let args = Args::try_parse_from(["chatsift", "in.txt", "-o", "chat_history.csv", "-f", "json"])
            .unwrap();
        assert_eq!(args.output.as_deref(), Some("chat_history.csv"));
        assert_eq!(args.output_path(), "chat_history.csv");
    }

    #[test]
    fn test_ndjson_alias() {
        let args = Args::try_parse_from(["chatsift", "in.txt", "-f", "ndjson"]).unwrap();
        assert_eq!(args.format, OutputFormat::Jsonl);
    }

    #[test]
    fn test_format_display_matches_library() {
        assert_eq!(OutputFormat::Csv.to_string(), "CSV");
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Jsonl).unwrap();
        assert_eq!(json, "\"jsonl\"");
    }
}
