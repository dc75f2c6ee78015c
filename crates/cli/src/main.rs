use clap::Parser;
use nexns_domain::CliOverrides;
use nexns_jobs::{DatasetResyncJob, JobRunner, NotificationListenerJob};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "nexns")]
#[command(version)]
#[command(about = "nexns - authoritative DNS server with per-client views")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Controller base URL
    #[arg(long, value_name = "URL")]
    controller: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        controller_url: cli.controller.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting nexns v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config);
    let controller = di::Controller::new(&config.controller)?;
    let use_cases = di::UseCases::new(&controller, &dns_services);

    match use_cases.sync_all.execute().await {
        Ok(summary) => info!(
            loaded = summary.loaded,
            rejected = summary.rejected,
            "Initial dataset load complete"
        ),
        Err(e) => warn!(error = %e, "Initial dataset load failed; starting with an empty index"),
    }

    let shutdown = CancellationToken::new();

    let listener = NotificationListenerJob::new(
        controller.notifications.clone(),
        use_cases.sync_all.clone(),
        use_cases.handle_notification.clone(),
    )
    .with_backoff(Duration::from_secs(config.controller.reconnect_backoff_secs));
    let resync = DatasetResyncJob::new(
        use_cases.sync_all.clone(),
        Duration::from_secs(config.controller.resync_interval_secs),
    );

    JobRunner::new()
        .with_notification_listener(listener)
        .with_dataset_resync(resync)
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let dns_addr = format!("{}:{}", config.server.bind_address, config.server.dns_port);
    let num_workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let mut dns_server = tokio::spawn(server::start_dns_server(
        dns_addr,
        dns_services.handler.clone(),
        num_workers,
        config.server.tcp_enabled,
        shutdown.clone(),
    ));

    let finished = tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
            None
        }
        result = &mut dns_server => Some(result),
    };

    shutdown.cancel();
    let result = match finished {
        Some(result) => result,
        None => dns_server.await,
    };
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            error!(error = %e, "DNS server error");
            return Err(e);
        }
        Err(e) => error!(error = %e, "DNS server task failed"),
    }

    info!("Server shutdown complete");
    Ok(())
}
