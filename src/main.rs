// curiousx: tokenizer, parser and syntax tree viewer

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use curiousx::cli::{Args, OutputFormat};
use curiousx::parser::lexer::LexerOptions;
use curiousx::parser::parse::{parse, ParseOutcome};
use curiousx::report::{json, text};
use curiousx::ui::App;

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr and stay quiet by default so the TUI is not disturbed
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read '{}'", args.file.display()))?;
    info!(path = %args.file.display(), bytes = source.len(), "read source");

    let outcome = parse(&source, args.lexer_options());
    match outcome.error() {
        Some(error) => info!(%error, tokens = outcome.tokens.len(), "parse failed"),
        None => info!(tokens = outcome.tokens.len(), "parse succeeded"),
    }

    match args.format {
        OutputFormat::Tui => run_tui(source, &outcome, args.lexer_options())?,
        OutputFormat::Text => emit(&args, &text::render(&outcome))?,
        OutputFormat::Json => {
            let mut report = json::to_string_pretty(&outcome).context("Failed to encode report")?;
            report.push('\n');
            emit(&args, &report)?;
        }
    }

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Write a rendered report to `--output` or stdout.
fn emit(args: &Args, rendered: &str) -> Result<()> {
    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write '{}'", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn run_tui(source: String, outcome: &ParseOutcome, options: LexerOptions) -> Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, outcome.clone(), options);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("Terminal viewer failed")
}
