//! CLI for deps-update-publisher.
//!
//! Runs as a GitHub Actions step: reads the action inputs from `INPUT_*`
//! environment variables (or flags), updates dependencies, and opens a pull
//! request when the manifest or lockfile changed.

use clap::Parser;
use deps_update_publisher::logging::LogSink;
use deps_update_publisher::{
    write_outputs, write_step_summary, Outcome, PackageManager, Runner, RunnerConfig,
    UpdateRequest,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXIT_FAILURE: u8 = 1;
const EXIT_CONFIG: u8 = 2;
const EXIT_INTERRUPTED: u8 = 130;

/// Update JavaScript dependencies and propose the result as a pull request.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Branch the update is based on and the pull request targets.
    #[arg(long, env = "INPUT_BASE-BRANCH")]
    base_branch: Option<String>,

    /// Branch created for the update commit.
    #[arg(long, env = "INPUT_TARGET-BRANCH")]
    target_branch: Option<String>,

    /// Token used to open the pull request; falls back to `GITHUB_TOKEN`.
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Directory holding `package.json`, relative to the checkout.
    #[arg(long, env = "INPUT_WORKING-DIRECTORY", default_value = ".")]
    working_directory: String,

    /// Emit verbose trace lines.
    #[arg(
        long,
        env = "INPUT_DEBUG",
        action = clap::ArgAction::Set,
        value_parser = parse_flag,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    debug: bool,

    /// Package manager; overrides the config file.
    #[arg(long, env = "INPUT_PACKAGE-MANAGER")]
    package_manager: Option<PackageManager>,

    /// Detect changes without committing, pushing, or opening a pull request.
    #[arg(
        long,
        env = "INPUT_DRY-RUN",
        action = clap::ArgAction::Set,
        value_parser = parse_flag,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    dry_run: bool,

    /// Path to the TOML config file.
    #[arg(long, env = "INPUT_CONFIG-PATH")]
    config_path: Option<PathBuf>,

    /// Repository in `owner/name` form.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// GitHub REST API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    api_url: String,
}

/// Parses an action boolean input.
///
/// Actions passes every input as a string, so `true`/`false` as well as the
/// usual `1`/`0`, `yes`/`no` and `on`/`off` spellings are accepted. An empty
/// value means the input was left unset.
fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(format!("expected true or false, got '{other}'")),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse arguments first; the debug input picks the log level
    let args = Args::parse();
    init_tracing(args.debug);

    // octocrab needs a process-wide rustls provider
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let checkout_root = match checkout_root() {
        Ok(root) => root,
        Err(e) => {
            error!(error = %e, "Could not determine the checkout root");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let config = RunnerConfig::new(checkout_root, args.repository.clone().unwrap_or_default())
        .with_api_url(args.api_url.clone())
        .with_config_path(args.config_path.clone())
        .with_package_manager(args.package_manager)
        .with_dry_run(args.dry_run)
        .with_workflow_commands(on_actions_runner());

    let runner = match Runner::new(config) {
        Ok(runner) => runner,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let request = build_request(args);

    let result = tokio::select! {
        result = runner.run(request) => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; in-flight commands were killed");
            return ExitCode::from(EXIT_INTERRUPTED);
        }
    };

    match result {
        Ok(outcome) => {
            report(&outcome);
            print_summary(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            runner.log().error(&e.to_string());
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Initializes tracing: `debug` when the debug input is set, else `RUST_LOG`
/// falling back to `info`.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(filter)
        .init();
}

/// Builds the request from the inputs. Missing values stay empty so
/// validation reports them by field.
fn build_request(args: Args) -> UpdateRequest {
    let credential = args
        .github_token
        .filter(|token| !token.trim().is_empty())
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .unwrap_or_default();

    UpdateRequest::new(
        args.base_branch.unwrap_or_default(),
        args.target_branch.unwrap_or_default(),
        credential,
    )
    .with_working_directory(args.working_directory)
    .with_verbose(args.debug)
}

/// `GITHUB_WORKSPACE` on a runner, else the current directory.
fn checkout_root() -> std::io::Result<PathBuf> {
    match env_path("GITHUB_WORKSPACE") {
        Some(workspace) => Ok(workspace),
        None => std::env::current_dir(),
    }
}

fn on_actions_runner() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true")
}

/// Writes the step outputs and summary when the runner provides the files.
fn report(outcome: &Outcome) {
    if let Some(path) = env_path("GITHUB_OUTPUT") {
        if let Err(e) = write_outputs(&path, outcome) {
            warn!(path = %path.display(), error = %e, "Failed to write step outputs");
        }
    }
    if let Some(path) = env_path("GITHUB_STEP_SUMMARY") {
        if let Err(e) = write_step_summary(&path, outcome) {
            warn!(path = %path.display(), error = %e, "Failed to write step summary");
        }
    }
}

fn env_path(variable: &str) -> Option<PathBuf> {
    std::env::var_os(variable)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Prints the final outcome.
fn print_summary(outcome: &Outcome) {
    println!("\nSummary:");
    println!("  Outcome: {}", outcome.as_str());
    match outcome {
        Outcome::NoChanges => println!("  Dependencies are up to date"),
        Outcome::PullRequestCreated { number, url } => {
            println!("  Pull request: #{number}");
            println!("  URL: {url}");
        }
        Outcome::ChangesDetected { changed_files } => {
            println!("  Mode: Dry Run");
            println!("  Changed files: {}", changed_files.join(", "));
        }
    }
    info!(outcome = outcome.as_str(), "Done");
}
