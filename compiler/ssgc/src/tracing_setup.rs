//! Tracing subscriber setup for the binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Directives used when the control file turns on `debug`.
const DEBUG_DIRECTIVES: &str = "ssgc=debug,ssg_codegen=debug,ssg_classify=trace";

/// Initialize tracing once per process.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or the
/// generator crates at debug level when `debug` is on. Debug mode prints
/// spans as an indented tree so nested type recursion stays readable.
pub fn init_tracing(debug: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let fallback = if debug { DEBUG_DIRECTIVES } else { "warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        let flat = (!debug).then(|| {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
        });
        let tree = debug.then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
        });

        let installed = tracing_subscriber::registry()
            .with(flat)
            .with(tree)
            .with(filter)
            .try_init();
        if let Err(err) = installed {
            eprintln!("warning: tracing already initialized: {err}");
        }
    });
}
