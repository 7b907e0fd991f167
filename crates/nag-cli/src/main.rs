mod cmd;
mod output;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nag-runner",
    about = "Reminds you to run important commands on a regular basis",
    long_about = "Reminds you to run important commands on a regular basis.\n\n\
        For every configured command whose interval has elapsed, asks whether to run it now:\n  \
        y  run the command (default)\n  \
        n  don't run it, nag again next time\n  \
        d  don't run it and restart the interval (it was run some other way)\n  \
        ?  show help",
    version
)]
struct Cli {
    /// Config file (default: ~/.config/nag_runner.json, then ~/.nag_runner.json)
    #[arg(long, short = 'c', env = "NAG_RUNNER_CONFIG")]
    config_path: Option<PathBuf>,

    /// Last-run ledger (default: ~/.cache/nag_runner/last_run.json)
    #[arg(long, short = 'l', env = "NAG_RUNNER_LAST_RUN")]
    last_run_path: Option<PathBuf>,

    /// Only consider the entry with this name
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Print how many days remain until each entry is due
    #[arg(long, group = "mode")]
    list: bool,

    /// Exit 1 if any entry is due, 0 otherwise; never prompts
    #[arg(long, group = "mode")]
    check: bool,

    /// Forget when the named entry last ran, so it nags next time
    #[arg(long, group = "mode", value_name = "NAME", conflicts_with = "name")]
    forget: Option<String>,

    /// Output as JSON (with --list or --check)
    #[arg(long, short = 'j')]
    json: bool,

    /// Debug logging (overrides RUST_LOG)
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let locations = cmd::Locations {
        config: cli.config_path.as_deref(),
        last_run: cli.last_run_path.as_deref(),
    };
    let name = cli.name.as_deref();

    let result = if cli.list {
        cmd::list::run(&locations, name, cli.json)
    } else if cli.check {
        match cmd::check::run(&locations, name, cli.json) {
            Ok(true) => std::process::exit(1),
            Ok(false) => Ok(()),
            Err(e) => Err(e),
        }
    } else if let Some(forget) = cli.forget.as_deref() {
        cmd::forget::run(&locations, forget)
    } else {
        cmd::nag::run(&locations, name)
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
