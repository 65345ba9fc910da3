use clap::Parser;
use lcu_sdk::LockfileWatcher;
use spectate::config::Cli;
use spectate::telemetry::init_tracing;
use spectate::{LcuSpectateApi, Outcome, SpectateConnector, ready_channel};
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(&cli.log_filter);

    let outcome = match run(cli).await {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("❌ {err:#}");
            std::process::exit(2);
        }
    };

    match &outcome {
        Outcome::Success { .. } => println!("Spectate request successful."),
        Outcome::Failure(err) => eprintln!("{err}"),
    }
    std::process::exit(outcome.exit_code());
}

async fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let config = cli.connector_config();
    let client = cli.client_config();
    let lockfile = client
        .lockfile
        .clone()
        .unwrap_or_else(LockfileWatcher::default_path);
    if let Some(dir) = lockfile.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        anyhow::ensure!(
            dir.is_dir(),
            "client install not found at {}; pass --lockfile",
            dir.display()
        );
    }

    info!(
        player_file = %config.player_file.display(),
        lockfile = %lockfile.display(),
        ready_timeout = ?config.ready_timeout,
        observe_mode = ?config.observe_mode,
        "starting spectate connector"
    );

    let (notifier, signal) = ready_channel();
    let watcher = LockfileWatcher::new(lockfile)
        .poll_interval(client.poll_interval)
        .request_timeout(client.request_timeout);
    let watch_task = watcher.spawn(move |connection| {
        if notifier.notify(connection).is_err() {
            warn!("connector stopped before the client became ready");
        }
    });

    let endpoints = config.endpoints.clone();
    let mut connector =
        SpectateConnector::new(config).on_resolved(|account| println!("PUUID: {account}"));
    let outcome = connector
        .run(signal, |connection| LcuSpectateApi::new(connection, endpoints))
        .await;
    watch_task.abort();
    Ok(outcome)
}
