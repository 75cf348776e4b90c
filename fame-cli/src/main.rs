//! whos-famous CLI
//!
//! Estimates how famous someone is from search engine result signals.

mod render;

use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fame_core::{EngineOutcome, Query};
use fame_net::FactConfig;
use fame_runtime::{AnalysisEvent, Analyzer, AnalyzerConfig};

use crate::render::RenderConfig;

/// Exit status after Ctrl-C
const EXIT_INTERRUPTED: i32 = 130;

const PROMPT: &str = "👉 Enter name to analyze";

#[derive(Parser)]
#[command(name = "whos-famous")]
#[command(author, version, about = "WHO'S FAMOUS: estimate fame from search engine signals", long_about = None)]
struct Cli {
    /// Name to analyze (prompted for when omitted)
    name: Option<String>,

    /// Verbosity level (repeat for more: -v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the assessment as JSON instead of the decorated report
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let render = RenderConfig::detect(io::stdout().is_terminal());
    debug!(
        "Terminal: {}x{} (layout width {})",
        render.terminal_width, render.height, render.width
    );

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    // The handler is registered on first poll, before the prompt starts
    tokio::select! {
        biased;
        Ok(()) = &mut interrupt => interrupted(&render),
        code = session(cli, render) => code,
    }
}

/// Prompt (if needed), analyze, and report
async fn session(cli: Cli, render: RenderConfig) -> ExitCode {
    if !cli.json {
        println!("{}\n", render::banner(&render));
    }

    let raw = match cli.name {
        Some(name) => name,
        None => match read_name(&render).await {
            Ok(name) => name,
            Err(e) if is_interrupt(&e) => interrupted(&render),
            Err(e) => {
                eprintln!("{}", render::error_panel(&render, "Error", &e.to_string()));
                return ExitCode::FAILURE;
            }
        },
    };

    let query = match Query::parse(&raw) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("{}", render::error_panel(&render, "Error", &e.to_string()));
            return ExitCode::FAILURE;
        }
    };

    match run(&query, &render, cli.json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            eprintln!(
                "{}",
                render::error_panel(&render, "Error", &format!("An error occurred: {}", e))
            );
            ExitCode::FAILURE
        }
    }
}

/// Print the interrupt notice and exit with status 130
fn interrupted(render: &RenderConfig) -> ! {
    eprintln!(
        "\n{}",
        render::error_panel(render, "Interrupted", "Program terminated by user.")
    );
    // A blocking stdin read may still be pending, so skip runtime shutdown
    std::process::exit(EXIT_INTERRUPTED)
}

/// Ctrl-C inside the line editor surfaces as an interrupted read
fn is_interrupt(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::Interrupted)
    })
}

/// Ask for a name: a line editor on a terminal, a plain line read otherwise
async fn read_name(render: &RenderConfig) -> Result<String> {
    println!("{}", render::divider(render, Some("ENTER NAME")));

    let interactive = io::stdin().is_terminal() && io::stderr().is_terminal();
    tokio::task::spawn_blocking(move || {
        if interactive {
            prompt_for_name()
        } else {
            read_piped_name(io::stdin().lock())
        }
    })
    .await?
}

fn prompt_for_name() -> Result<String> {
    let name = Input::<String>::new()
        .with_prompt(PROMPT)
        .allow_empty(true)
        .interact_text()?;
    Ok(name)
}

fn read_piped_name(mut input: impl BufRead) -> Result<String> {
    eprint!("{}: ", PROMPT);
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Fact length follows the real terminal, not the capped layout width
fn fact_config(render: &RenderConfig) -> FactConfig {
    FactConfig::for_width(render.terminal_width)
}

async fn run(query: &Query, render: &RenderConfig, json: bool) -> Result<()> {
    let config = AnalyzerConfig {
        facts: fact_config(render),
        ..AnalyzerConfig::default()
    };
    let analyzer = Analyzer::new(config)?;

    let progress = if json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(analyzer.engines().len() as u64)
    };
    progress.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg:.blue} [{bar:30.cyan/green}] {pos}/{len} {elapsed}")?
            .progress_chars("━╸ "),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_message("Searching engines...");

    let mut rng = rand::thread_rng();
    let assessment = analyzer
        .analyze(query, &mut rng, |event| match event {
            AnalysisEvent::SearchStarted { total } => progress.set_length(total as u64),
            AnalysisEvent::EngineFinished { result, .. } => {
                if let EngineOutcome::Failed(reason) = &result.outcome {
                    progress.println(format!("Error with {}: {}", result.engine, reason));
                }
                progress.inc(1);
            }
            AnalysisEvent::SignalEstimated { .. } => {}
            AnalysisEvent::FactLookup => progress.set_message("Finding facts..."),
        })
        .await;
    progress.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    println!("{}\n", render::report(render, &assessment));
    println!("{}", render::footer(render));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_length_uses_raw_terminal_width() {
        assert_eq!(fact_config(&RenderConfig::new(200, 50, false)).max_len, 300);
        assert_eq!(fact_config(&RenderConfig::new(100, 50, false)).max_len, 200);
        assert_eq!(fact_config(&RenderConfig::new(40, 50, false)).max_len, 150);
    }

    #[test]
    fn test_read_piped_name() {
        let name = read_piped_name("Ada Lovelace\r\n".as_bytes()).unwrap();
        assert_eq!(name, "Ada Lovelace");
        assert_eq!(read_piped_name("".as_bytes()).unwrap(), "");
    }

    #[test]
    fn test_is_interrupt() {
        let interrupted = anyhow::Error::new(io::Error::from(io::ErrorKind::Interrupted));
        assert!(is_interrupt(&interrupted.context("prompt")));
        assert!(!is_interrupt(&anyhow::anyhow!("boom")));
    }
}
