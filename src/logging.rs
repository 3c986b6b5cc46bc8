//! Tracing setup.
//!
//! The checker logs pass boundaries at `debug` and each reported violation
//! at `trace`. Nothing is printed unless a subscriber is installed.
//!
//! ```bash
//! JSINTEROP_LOG=debug my-compiler ...
//! JSINTEROP_LOG="jsinterop_checker::passes=trace" my-compiler ...
//! ```

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "JSINTEROP_LOG";

/// `JSINTEROP_LOG` takes precedence over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install a stderr `fmt` subscriber filtered by `JSINTEROP_LOG` (or
/// `RUST_LOG`).
///
/// Does nothing when neither variable is set or when a global subscriber is
/// already installed, so it is safe to call more than once.
pub fn init_tracing() {
    if std::env::var(LOG_ENV).is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
