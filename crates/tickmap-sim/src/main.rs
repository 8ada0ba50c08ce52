//! TickMap simulator - drives a store from a synthetic packet loop

use anyhow::{ensure, Result};
use clap::Parser;
use tickmap::{Store, Tick};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Wheel capacity: largest accepted TTL
    #[arg(short, long, default_value_t = 64)]
    max_tick: Tick,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// New flows per tick
    #[arg(short, long, default_value_t = 16)]
    rate: u64,

    /// TTLs cycle through 0..=ttl_max (clamped to max_tick)
    #[arg(long, default_value_t = 32)]
    ttl_max: Tick,

    /// Lookups of recent flows per tick
    #[arg(short, long, default_value_t = 8)]
    lookups: u64,
}

/// A flow record keyed by its flow id
#[derive(Debug)]
struct Flow {
    key: Vec<u8>,
    first_seen: Tick,
}

impl tickmap::Keyed for Flow {
    fn key(&self) -> &[u8] {
        &self.key
    }
}

fn flow_key(n: u64) -> Vec<u8> {
    format!("flow-{}", n).into_bytes()
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let ttl_max = args.ttl_max.min(args.max_tick);

    info!("Starting TickMap simulator v{}", env!("CARGO_PKG_VERSION"));
    info!(
        max_tick = args.max_tick,
        ticks = args.ticks,
        rate = args.rate,
        ttl_max,
        "Configuration"
    );

    let mut store = Store::try_new(args.max_tick)?;
    let mut next_flow = 0u64;
    let mut oldest_expired: Option<Tick> = None;

    for _ in 0..args.ticks {
        let now = store.current_tick();

        for _ in 0..args.rate {
            let flow = Flow {
                key: flow_key(next_flow),
                first_seen: now,
            };
            store.put(flow, next_flow % (ttl_max + 1))?;
            next_flow += 1;
        }

        for i in 0..args.lookups.min(next_flow) {
            let _ = store.get(&flow_key(next_flow - 1 - i));
        }

        let expired = store.advance(1);
        if let Some(age) = expired.iter().map(|f| store.current_tick() - f.first_seen).max() {
            oldest_expired = Some(oldest_expired.map_or(age, |o| o.max(age)));
        }
        debug!(tick = store.current_tick(), expired = expired.len(), live = store.size(), "Tick");
    }

    let stats = store.stats();
    info!(
        live = store.size(),
        inserts = stats.inserts(),
        expirations = stats.expirations(),
        hit_ratio = stats.hit_ratio(),
        oldest_expired_age = oldest_expired.unwrap_or(0),
        "Simulation finished"
    );

    let live = store.size();
    let drained = store.advance(args.max_tick.saturating_add(1));
    ensure!(
        drained.len() == live && store.is_empty(),
        "drained {} of {} live flows",
        drained.len(),
        live
    );
    info!(drained = drained.len(), "Store drained");

    Ok(())
}
