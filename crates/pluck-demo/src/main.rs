#![forbid(unsafe_code)]

//! Interval-feed demo.
//!
//! A stream emits `{num: {val: tick}}` every `--interval-ms`. The adapter
//! watches it through `--path`; each delivery marks the host dirty, and the
//! host re-runs the transform only when dirty, printing changed values as
//! JSON on stdout. Logs go to stderr.

mod cli;

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use pluck_core::Value;
use pluck_runtime::{AdapterConfig, AsyncPluck, PluckError, Stream};
use tracing::{debug, error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::Opts;

fn main() {
    init_logging();
    let opts = Opts::parse();
    if let Err(err) = run(&opts) {
        error!(%err, "demo failed");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(opts: &Opts) -> Result<(), PluckError> {
    let mut config = AdapterConfig::from_env();
    config.memoize &= opts.memoize;
    info!(
        label = %config.label,
        path = %opts.path,
        ticks = opts.ticks,
        interval_ms = opts.interval_ms,
        memoize = config.memoize,
        "starting feed"
    );

    let feed = Stream::<Value>::new();
    let dirty = Rc::new(Cell::new(false));
    let flag = Rc::clone(&dirty);
    let mut adapter = AsyncPluck::with_config(config, move || flag.set(true));

    // First bind subscribes; nothing has arrived yet.
    adapter.transform(&feed, &opts.path)?;

    let interval = Duration::from_millis(opts.interval_ms);
    for tick in 0..opts.ticks {
        thread::sleep(interval);
        feed.emit(tick_value(tick));
        if !dirty.replace(false) {
            continue;
        }

        let result = adapter.transform(&feed, &opts.path)?;
        debug!(tick, changed = result.is_changed(), "checked");
        if result.is_changed() {
            println!("{}", serde_json::Value::from(result.value()));
        }
    }

    feed.complete();
    adapter.dispose();
    info!(ticks = opts.ticks, "feed finished");
    Ok(())
}

fn tick_value(tick: u64) -> Value {
    Value::object([("num", Value::object([("val", tick)]))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pluck_core::{pluck, pluck_path};

    #[test]
    fn tick_value_shape() {
        assert_eq!(
            pluck(&tick_value(7), &pluck_path!["num", "val"]),
            Value::from(7u64)
        );
    }

    #[test]
    fn zero_ticks_runs_cleanly() {
        let opts = Opts {
            ticks: 0,
            interval_ms: 0,
            ..Opts::default()
        };
        assert!(run(&opts).is_ok());
    }
}
