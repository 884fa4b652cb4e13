//! Browser console logging

use tracing_subscriber::fmt::format::Pretty;
use tracing_subscriber::prelude::*;
use tracing_web::{MakeWebConsoleWriter, performance_layer};

/// Route `tracing` events to the browser console and performance timeline
pub fn init() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());
    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

    if let Err(e) = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(perf_layer)
        .try_init()
    {
        web_sys::console::warn_1(&format!("Logging already initialised: {e}").into());
    }
}
