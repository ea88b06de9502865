//! # chatsift CLI
//!
//! Command-line interface for the chatsift library.

use std::io;
use std::process;
use std::time::{Duration, Instant};

use clap::Parser as ClapParser;
use tracing::info;

use chatsift::cli::Args;
use chatsift::config::{ParserConfig, StreamingConfig};
use chatsift::core::{OutputConfig, ParseDiagnostics};
use chatsift::denylist::Denylist;
use chatsift::format::{OutputFormat, write_to_format};
use chatsift::logging::init_logging;
use chatsift::parser::ChatLogParser;
use chatsift::source::{SourceEncoding, read_source};
use chatsift::streaming::RecordStream;
use chatsift::{ChatsiftError, MessageRecord};

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatsiftError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    if args.print_denylist {
        println!("{}", Denylist::default().to_json_pretty()?);
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "no input file given").into());
    };
    let output_path = args.output_path();

    // Print header
    println!("🧹 chatsift v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", input);
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", args.format);
    if args.streaming {
        println!("🌊 Mode:    Streaming");
    }

    let mut config = ParserConfig::new();
    if let Some(ref path) = args.denylist {
        let denylist = Denylist::from_path(path)?;
        println!("🚫 Denylist: {} ({} phrases)", path.display(), denylist.len());
        config = config.with_denylist(denylist);
    }
    println!();

    let (records, diagnostics, parse_time) = if args.streaming {
        parse_streaming(input, &config)?
    } else {
        parse_regular(input, &config)?
    };

    println!(
        "📑 {} lines read, {} header lines matched ({:.2}s)",
        diagnostics.lines_read,
        diagnostics.header_matches,
        parse_time.as_secs_f64()
    );
    println!(
        "   {} records kept, {} placeholders discarded, {} orphan lines",
        diagnostics.records_emitted, diagnostics.records_discarded, diagnostics.orphan_lines
    );

    if diagnostics.is_zero_yield() {
        eprintln!();
        eprintln!("❌ No messages extracted");
        if diagnostics.header_matches == 0 {
            eprintln!("   No line matched `M/D/YY, HH:MM:SS - Author: text`.");
            eprintln!("   Check that the file is a text chat export.");
        } else {
            eprintln!("   Every message matched a placeholder phrase.");
        }
        process::exit(1);
    }

    let lib_format: OutputFormat = args.format.into();
    println!("💾 Writing {}...", lib_format);
    let write_start = Instant::now();
    write_to_format(&records, &output_path, lib_format, &OutputConfig::new())?;
    info!(path = %output_path, records = records.len(), "output written");
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    if args.preview > 0 {
        println!();
        println!("👀 Preview:");
        print_preview(&records, args.preview);
    }

    // Summary
    let total_time = total_start.elapsed();
    println!();
    println!("📊 Summary:");
    println!("   Records:    {}", records.len());
    println!("   Discarded:  {:.1}%", diagnostics.discard_ratio());
    println!("   Total time: {:.2}s", total_time.as_secs_f64());

    Ok(())
}

/// Reads the whole export, then parses it.
fn parse_regular(
    input: &str,
    config: &ParserConfig,
) -> Result<(Vec<MessageRecord>, ParseDiagnostics, Duration), ChatsiftError> {
    println!("⏳ Parsing...");
    let parse_start = Instant::now();

    let source = read_source(input)?;
    if source.encoding() == SourceEncoding::Latin1 {
        println!("⚠️  Input is not valid UTF-8, decoded as {}", source.encoding());
    }

    let outcome = ChatLogParser::with_config(config.clone()).parse_source(&source);
    Ok((outcome.records, outcome.diagnostics, parse_start.elapsed()))
}

/// Streams the export line by line after deciding its encoding.
fn parse_streaming(
    input: &str,
    config: &ParserConfig,
) -> Result<(Vec<MessageRecord>, ParseDiagnostics, Duration), ChatsiftError> {
    println!("⏳ Streaming...");
    let parse_start = Instant::now();

    let mut stream = RecordStream::open(input, config, StreamingConfig::default())?;
    if stream.encoding() == Some(SourceEncoding::Latin1) {
        println!("⚠️  Input is not valid UTF-8, decoded as {}", SourceEncoding::Latin1);
    }
    let records = stream.by_ref().collect::<Result<Vec<_>, _>>()?;

    let diagnostics = *stream.diagnostics();
    Ok((records, diagnostics, parse_start.elapsed()))
}

fn print_preview(records: &[MessageRecord], limit: usize) {
    for record in records.iter().take(limit) {
        println!("   {}", record.to_header_line());
    }
    if records.len() > limit {
        println!("   ... {} more", records.len() - limit);
    }
}
