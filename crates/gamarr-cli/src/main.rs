// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use gamarr_application::{
    publish_decisions, AppState, DecisionService, DownloadDecision, EvaluationContext,
    InMemoryEventBus,
};
use gamarr_config::{load as load_config, TelemetryConfig};
use gamarr_infrastructure::init_store;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "gamarr")]
#[command(about = "Evaluate and rank game releases from a library fixture", long_about = None)]
struct CliArgs {
    /// JSON fixture holding games, history, blocklist, queue, indexers and candidates
    fixture: PathBuf,

    /// Optional TOML configuration file
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    let config = load_config(args.config.as_deref())?;
    init_tracing(&config.telemetry);

    let state = AppState::new(config.clone());
    state.on_start();

    let (store, fixture) = init_store(&args.fixture)?;

    let (abort_tx, abort_rx) = watch::channel(false);
    let signal_task = tokio::spawn(async move {
        shutdown_signal().await;
        let _ = abort_tx.send(true);
    });

    let service = DecisionService::new(config.decision.clone(), store, InMemoryEventBus::new());
    let context = EvaluationContext::rss(Utc::now());

    let decisions = service
        .evaluate_batch(fixture.remote_games(), &context, abort_rx)
        .await?;
    let ranked = service.rank(decisions, context.now);
    publish_decisions(service.publisher(), &ranked);

    for decision in &ranked {
        println!("{}", format_decision(decision));
    }
    info!(
        target: "cli",
        decisions = ranked.len(),
        events = service.publisher().len(),
        "decisions published"
    );

    signal_task.abort();
    Ok(())
}

fn init_tracing(telemetry: &TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&telemetry.log_level));
    let registry = tracing_subscriber::registry().with(env_filter);

    // Decisions go to stdout, so logs stay on stderr.
    if telemetry.json {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn format_decision(decision: &DownloadDecision) -> String {
    let remote = &decision.remote_game;
    let quality = remote
        .quality()
        .map(|quality| quality.to_string())
        .unwrap_or_else(|| "unparsed".to_string());

    match &decision.rejection {
        None => format!(
            "APPROVED  {} [{}] score={} {}",
            remote.release.title,
            quality,
            remote.custom_format_score,
            remote.release.download_protocol
        ),
        Some(rejection) => format!(
            "REJECTED  {} [{}] {}: {} ({})",
            remote.release.title,
            quality,
            rejection.reason,
            rejection.message,
            rejection.rejection_type
        ),
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(mut interrupt), Ok(mut terminate)) => {
                tokio::select! {
                    _ = interrupt.recv() => {},
                    _ = terminate.recv() => {},
                }
            }
            (Err(error), _) | (_, Err(error)) => {
                warn!(target: "cli", %error, "failed to install signal handlers");
                std::future::pending::<()>().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(target: "cli", %error, "failed to install ctrl_c handler");
            std::future::pending::<()>().await;
        }
    }

    info!(target: "cli", "shutdown signal received");
}
