use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use ecobee_adapters::ecobee::EcobeeAdapter;
use tracing::info;

use ecobee_exporter::logging;
use ecobee_exporter::server::run_server;
use ecobee_exporter::settings::{ExporterConfig, Overrides};
use ecobee_exporter::{EcobeeCollector, FileSource, PrometheusExporter, ThermostatSource};

#[derive(Parser, Debug)]
#[command(name = "ecobee-exporter")]
#[command(about = "Prometheus exporter for ecobee thermostats and remote sensors")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to serve metrics on (e.g. "0.0.0.0:9500")
    #[arg(short, long)]
    listen_addr: Option<String>,

    /// HTTP path of the metrics endpoint
    #[arg(long)]
    metrics_path: Option<String>,

    /// Prefix for every metric name
    #[arg(short, long)]
    prefix: Option<String>,

    /// Base URL of the ecobee API
    #[arg(long)]
    endpoint: Option<String>,

    /// OAuth access token for the ecobee API
    #[arg(long)]
    access_token: Option<String>,

    /// API request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Read thermostats from a saved API response instead of the API
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Log filter (e.g. "debug", "ecobee_exporter=trace"); overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,

    /// Print one scrape to stdout and exit
    #[arg(long)]
    once: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            listen_addr: self.listen_addr.clone(),
            metrics_path: self.metrics_path.clone(),
            prefix: self.prefix.clone(),
            api_endpoint: self.endpoint.clone(),
            access_token: self.access_token.clone(),
            timeout_secs: self.timeout,
            file: self.file.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(args.log_level.as_deref())
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))?;

    let config = ExporterConfig::load(args.config.as_deref(), &args.overrides())
        .context("invalid configuration")?;

    let source = build_source(&config)?;
    info!(source = source.description(), prefix = %config.prefix, "starting exporter");

    let collector = EcobeeCollector::new(source, &config.prefix);
    let exporter = PrometheusExporter::new(collector).context("failed to register metrics")?;

    if args.once {
        print!("{}", exporter.render().await);
        return Ok(());
    }

    let addr = config.listen_addr;
    run_server(addr, config.metrics_path, Arc::new(exporter))
        .await
        .with_context(|| format!("metrics server on {} failed", addr))
}

fn build_source(config: &ExporterConfig) -> Result<Box<dyn ThermostatSource>> {
    if let Some(path) = &config.file {
        return Ok(Box::new(FileSource::new(path)));
    }

    let mut builder = EcobeeAdapter::builder()
        .endpoint(&config.api_endpoint)
        .timeout(config.timeout);
    if let Some(token) = &config.access_token {
        builder = builder.access_token(token);
    }
    let adapter = builder.build().context("failed to create ecobee client")?;
    Ok(Box::new(adapter))
}
