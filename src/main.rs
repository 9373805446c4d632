mod collectors;
mod config;
mod logfile;
mod probe;
mod record;
mod sampler;
mod scheduler;

use clap::Parser;
use config::Config;
use logfile::LogFile;
use probe::{HttpTransport, Prober};
use sampler::Sampler;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pulselog")]
#[command(version)]
struct Cli {
    /// Optional YAML configuration; built-in defaults apply when absent.
    #[arg(long)]
    config: Option<String>,
    /// Override the log destination from the configuration.
    #[arg(long)]
    log_path: Option<String>,
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if cli.print_default_config {
        println!("{}", Config::example_yaml());
        return;
    }

    let mut cfg = match &cli.config {
        Some(path) => match Config::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                error!(error = %err, "failed to load configuration");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    if let Some(path) = cli.log_path {
        cfg.log_path = path;
    }

    info!(
        log_path = %cfg.log_path,
        iterations = cfg.iterations,
        interval_secs = cfg.interval_secs,
        probe_url = %cfg.probe.url,
        "starting pulselog"
    );

    let transport = match HttpTransport::new(cfg.probe.connect_timeout(), cfg.probe.total_timeout())
    {
        Ok(transport) => transport,
        Err(err) => {
            error!(error = %err, "failed to build the HTTP client");
            std::process::exit(1);
        }
    };
    let prober = Prober::new(transport, cfg.probe.url.clone(), cfg.probe.watchdog_timeout());
    let mut sampler = Sampler::new(prober, cfg.root_mount.clone());
    let log = LogFile::new(&cfg.log_path);

    if let Err(err) = scheduler::run(&cfg, &mut sampler, &log).await {
        error!(error = %err, "run aborted");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
