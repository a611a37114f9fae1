//! End-to-end wiring: load configuration, open the configured backend,
//! grant some XP, and print the resulting progress events.
//!
//! Run with `cargo run -p stratum-store --example grant`. Writes
//! `stratum.yml` next to the working directory on first run.

use std::path::Path;
use std::sync::Arc;

use stratum_config::Config;
use stratum_core::curve::LevelCurve;
use stratum_core::engine::ProgressEngine;
use stratum_core::grants::{AutoGrant, GrantAmounts};
use stratum_core::notify::{self, DEFAULT_EVENT_CAPACITY};
use stratum_core::placeholders::PlaceholderResolver;
use stratum_store::open_store;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let config = Config::load(Path::new("stratum.yml")).await;
    let store = open_store(&config).await?;

    let curve = LevelCurve::new(config.curve.costs.clone(), config.curve.default_increment);
    let (tx, mut rx) = notify::channel(DEFAULT_EVENT_CAPACITY);
    let engine = Arc::new(ProgressEngine::new(curve, Arc::clone(&store), tx));

    let consumer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if event.leveled_up {
                println!(
                    "{} reached level {} ({} xp)",
                    event.progress.name, event.progress.level, event.progress.xp
                );
            } else {
                println!(
                    "{} gained xp, now {} at level {}",
                    event.progress.name, event.progress.xp, event.progress.level
                );
            }
        }
    });

    let player = Uuid::new_v4();

    // Automatic grants driven by the configured task amounts.
    let auto = AutoGrant::new(
        Arc::clone(&engine),
        GrantAmounts::from(&config.grants),
    );
    auto.on_join(player, "steve").await;
    auto.on_chat(player, "steve").await;

    engine.grant_xp(player, "steve", 75).await;
    engine.grant_xp(player, "steve", 75).await;

    let resolver = PlaceholderResolver::new(Arc::clone(&engine));
    if let Some(progress) = resolver.resolve(player, "level_progress").await {
        println!("progress toward next level: {progress}");
    }

    auto.on_disconnect(player);

    // Dropping the engine closes the event channel and ends the consumer.
    drop(auto);
    drop(resolver);
    drop(engine);
    consumer.await?;

    store.shutdown().await?;
    Ok(())
}
