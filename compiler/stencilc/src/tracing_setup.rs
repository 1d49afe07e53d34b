//! Tracing subscriber setup for the `stencil` binary and tests.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        }
    });
}
