//! herald - Scripted demo feed for the notification runtime

use herald::domain::{NotificationAction, NotificationId, NotificationRecord};
use herald::runtime::StackRuntime;
use herald::StackSettings;
use tokio::time::{sleep, Duration};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting herald demo");

    if let Err(e) = run().await {
        tracing::error!("Demo error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = match StackSettings::load_or_default() {
        Ok(settings) => settings,
        Err(error) => {
            tracing::warn!(%error, "Falling back to default settings");
            StackSettings::default()
        }
    };

    let mut runtime = StackRuntime::spawn(settings)?;

    // Log every lifecycle event the stack emits.
    let mut events = runtime.subscribe();
    let logger = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::info!(?event, "Stack event");
        }
    });

    // A short-lived success toast and a persistent error with an action.
    let mut desired = vec![
        NotificationRecord::success("welcome", "Welcome to herald"),
        NotificationRecord::error("offline", "Connection lost")
            .with_body("Retrying in the background")
            .with_action(NotificationAction::new("retry", "Retry").primary()),
    ];
    runtime.reconcile(desired.clone())?;

    // A burst that overflows the visible capacity and triggers eviction.
    sleep(Duration::from_millis(800)).await;
    for i in 0..6 {
        desired.push(NotificationRecord::info(
            format!("bulk-{i}"),
            format!("Item {i} processed"),
        ));
    }
    runtime.reconcile(desired.clone())?;

    // Simulate the user acting on the error toast, then dismissing it.
    sleep(Duration::from_millis(1500)).await;
    runtime.invoke_action(NotificationId::from("offline"), "retry")?;
    runtime.dismiss(NotificationId::from("offline"))?;

    // Let the remaining countdowns run out.
    sleep(Duration::from_secs(7)).await;
    let remaining = runtime.view().borrow().toasts.len();
    tracing::info!(remaining, "Feed complete");

    runtime.shutdown().await;
    drop(runtime);
    logger.await?;
    Ok(())
}
