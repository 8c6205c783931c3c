//! Tracing subscriber setup.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a subscriber for the `tern` binary.
///
/// Call once at startup; later calls do nothing. Filter directives come from
/// `TERN_LOG`, or `RUST_LOG` when that is unset, e.g.
/// `TERN_LOG=tern_eval=debug`. With neither set nothing is installed. Set
/// `TERN_LOG_TREE` for an indented span tree instead of one line per event.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(directives) = std::env::var("TERN_LOG").or_else(|_| std::env::var("RUST_LOG"))
        else {
            return;
        };
        let registry = tracing_subscriber::registry().with(EnvFilter::new(directives));

        // A subscriber installed by an embedding program takes precedence.
        let _ = if std::env::var_os("TERN_LOG_TREE").is_some() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
    });
}
