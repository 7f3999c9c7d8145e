/*!
 * Command-line interface for projdump
 */

use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use projdump::config::{Args, Config};
use projdump::report::{ReportFormat, Reporter, ScanReport};
use projdump::scanner::Scanner;
use projdump::writer::MarkdownWriter;

fn main() {
    let args = Args::parse();
    let quiet = args.quiet;

    setup_logging(quiet, args.verbose);
    log::debug!("CLI args parsed: {:?}", args);

    if let Err(e) = run(Config::from_args(args), quiet) {
        log::error!("Overview generation failed: {}", e);
        eprintln!("\n❌ Error: {}", e);
        process::exit(1);
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn run(config: Config, quiet: bool) -> projdump::Result<()> {
    config.validate()?;

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📊 Overview");

    let start_time = Instant::now();

    let scanner = Scanner::new(&config, Arc::new(progress.clone()))?;
    progress.set_message(format!(
        "📂 Scanning directory: {}",
        scanner.root().display()
    ));

    let (document, stats) = scanner.scan();

    let output_path = config.output_path()?;
    progress.set_message(format!("💾 Writing {}", output_path.display()));
    let writer = MarkdownWriter::new(&output_path);
    let result = writer.write(&document);

    progress.finish_and_clear();
    result?;

    if !quiet {
        let report = ScanReport {
            output_file: output_path.display().to_string(),
            duration: start_time.elapsed(),
            entries: stats.entries,
            files_processed: stats.files_processed,
            files_unreadable: stats.files_unreadable,
            total_lines: stats.total_lines,
            total_chars: stats.total_chars,
            file_details: stats.file_details,
        };
        Reporter::new(ReportFormat::ConsoleTable).print_report(&report);
        println!("\n🎉 Project overview written to {}", output_path.display());
    }

    Ok(())
}
