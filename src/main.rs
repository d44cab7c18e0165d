// src/main.rs
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use relief_smoke::{
    checks::default_checks,
    config::{self, ConfigOverrides, ReportFormat},
    metrics,
    report::{render_json, ConsoleProgress, SilentProgress},
    runner::TestRunner,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use url::Url;

/// Exit status when the run could not start at all.
const SETUP_FAILURE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "relief-smoke", version, about = "Smoke-test the Resilience2Relief AI HTTP API")]
struct Cli {
    /// YAML or JSON configuration file
    #[arg(short, long, value_name = "PATH", env = "R2R_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the service under test
    #[arg(long, value_name = "URL", env = "R2R_BASE_URL")]
    base_url: Option<Url>,

    /// Timeout for lightweight checks, in seconds
    #[arg(long = "timeout", value_name = "SECS", env = "R2R_TIMEOUT_SECS")]
    default_timeout: Option<u64>,

    /// Timeout for the file upload check, in seconds
    #[arg(long, value_name = "SECS", env = "R2R_UPLOAD_TIMEOUT_SECS")]
    upload_timeout: Option<u64>,

    /// Timeout for the project generation check, in seconds
    #[arg(long, value_name = "SECS", env = "R2R_GENERATION_TIMEOUT_SECS")]
    generation_timeout: Option<u64>,

    /// Seconds to wait before the first request
    #[arg(long, value_name = "SECS", env = "R2R_STARTUP_DELAY_SECS")]
    startup_delay: Option<u64>,

    /// Start immediately, same as --startup-delay 0; wins over R2R_STARTUP_DELAY_SECS
    #[arg(long)]
    no_wait: bool,

    /// Report format written to stdout
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Write Prometheus text-format metrics here after the run
    #[arg(long, value_name = "PATH", env = "R2R_METRICS_FILE")]
    metrics_file: Option<PathBuf>,

    /// Directory for the upload check's temporary document
    #[arg(long, value_name = "DIR")]
    scratch_dir: Option<PathBuf>,

    /// Only warn when generated projects lack expected fields
    #[arg(long)]
    lenient: bool,

    /// Print the check names in run order and exit
    #[arg(long)]
    list: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            default_timeout_secs: self.default_timeout,
            upload_timeout_secs: self.upload_timeout,
            generation_timeout_secs: self.generation_timeout,
            startup_delay_secs: if self.no_wait {
                Some(0)
            } else {
                self.startup_delay
            },
            scratch_dir: self.scratch_dir.clone(),
            metrics_file: self.metrics_file.clone(),
            format: self.format.map(Into::into),
            lenient: self.lenient,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialise logging: {:#}", e);
        return ExitCode::from(SETUP_FAILURE);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(SETUP_FAILURE)
        }
    }
}

fn init_tracing() -> Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("relief_smoke=warn".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run(cli: Cli) -> Result<ExitCode> {
    if cli.list {
        for check in default_checks() {
            println!("{}", check.name());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = config::resolve_config(cli.config.as_deref(), &cli.overrides()).await?;
    info!(base_url = %config.base_url, format = ?config.format, "Configuration loaded");

    let runner = TestRunner::with_default_checks(config.clone())
        .context("Failed to build test runner")?;

    let delay = config.startup_delay();
    if !delay.is_zero() {
        if config.format == ReportFormat::Text {
            println!("⏳ Waiting for server to be ready...");
        }
        tokio::time::sleep(delay).await;
    }

    let result = match config.format {
        ReportFormat::Text => runner.run(&mut ConsoleProgress::stdout()).await,
        ReportFormat::Json => {
            let result = runner.run(&mut SilentProgress).await;
            println!("{}", render_json(&result)?);
            result
        }
    };

    if let Some(path) = &config.metrics_file {
        if let Err(e) = metrics::write_textfile(path, &result).await {
            warn!("Failed to export metrics: {:#}", e);
        }
    }

    Ok(ExitCode::from(result.exit_code()))
}
