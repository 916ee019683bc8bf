use clap::Parser;
use masspay::application::monitor::{JobMonitor, MonitorParams};
use masspay::config::Config;
use masspay::domain::batch::PaymentBatch;
use masspay::domain::ports::JobSubmitter;
use masspay::infrastructure::http::MasspayApi;
use masspay::interfaces::csv::recipient_reader::RecipientReader;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input recipients CSV file (destination, amount)
    input: PathBuf,

    /// Email address the job report is sent to
    #[arg(long)]
    email: String,

    /// Never-expiring OAuth2 account token
    #[arg(long, env = "MASSPAY_TOKEN", hide_env_values = true)]
    token: String,

    /// Numeric account PIN
    #[arg(long, env = "MASSPAY_PIN", hide_env_values = true)]
    pin: u32,

    /// Account UID (e.g. 123-456-7890)
    #[arg(long, env = "MASSPAY_UID")]
    uid: String,

    /// Submit live payments instead of test payments
    #[arg(long)]
    live: bool,

    /// Recipients assume transfer costs instead of the sender
    #[arg(long)]
    recipients_assume_costs: bool,

    /// Funding source to draw from (default: balance)
    #[arg(long)]
    source: Option<String>,

    /// Caller-assigned job id, usable as an alternate lookup key
    #[arg(long)]
    user_job_id: Option<String>,

    /// Poll interval in milliseconds while waiting for completion
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Give up waiting after this many milliseconds (0 = wait forever)
    #[arg(long, default_value_t = 0)]
    timeout_ms: u64,

    /// Submit the job without waiting for it to complete
    #[arg(long)]
    no_wait: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::new(cli.token, cli.pin, cli.uid).into_diagnostic()?;
    let api = MasspayApi::new(config).into_diagnostic()?;

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = RecipientReader::new(file);
    let payments = reader
        .payments()
        .collect::<masspay::error::Result<Vec<_>>>()
        .into_diagnostic()?;

    let mut batch = PaymentBatch::new(cli.email, payments).into_diagnostic()?;
    if cli.live {
        batch.test = Some(false);
    }
    if cli.recipients_assume_costs {
        batch.assume_costs = Some(false);
    }
    batch.source = cli.source;
    batch.user_job_id = cli.user_job_id;

    let job = api.create_job(&batch).await.into_diagnostic()?;
    println!("{}", serde_json::to_string_pretty(&job).into_diagnostic()?);

    if cli.no_wait {
        return Ok(());
    }

    let params = MonitorParams {
        poll_interval: Duration::from_millis(cli.interval_ms),
        deadline: (cli.timeout_ms > 0).then(|| Duration::from_millis(cli.timeout_ms)),
        job_id: Some(job.job_id.clone()),
        user_job_id: job.user_job_id.clone(),
    };
    let monitor = JobMonitor::new(api);
    let finished = monitor.run(params).await.into_diagnostic()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&finished).into_diagnostic()?
    );

    Ok(())
}
