//
//  atlassian-api
//  logging.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Logging setup
//!
//! The library only emits `tracing` events under the span each client was
//! given; it never installs a subscriber. Applications that have no tracing
//! setup of their own can build one here and install it themselves, or scope
//! it to a block with [`tracing::subscriber::with_default`].
//!
//! ```rust,no_run
//! use atlassian_api::logging;
//!
//! tracing::subscriber::set_global_default(logging::subscriber_from_env())
//!     .expect("a global subscriber was already set");
//! ```

use tracing::Span;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Environment variable read by [`subscriber_from_env`].
pub const LOG_ENV: &str = "ATLASSIAN_API_LOG";

/// Builds a formatted subscriber filtered by `filter` (e.g. `"atlassian_api=debug"`).
///
/// An unparsable filter falls back to `warn`.
pub fn subscriber(filter: &str) -> impl tracing::Subscriber + Send + Sync {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    Registry::default()
        .with(fmt::layer().with_target(false))
        .with(filter)
}

/// Builds a subscriber filtered by [`LOG_ENV`], defaulting to `warn`.
pub fn subscriber_from_env() -> impl tracing::Subscriber + Send + Sync {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    Registry::default()
        .with(fmt::layer().with_target(false))
        .with(filter)
}

/// The span a client records under when the caller supplies none.
pub fn client_span(base_url: &str) -> Span {
    tracing::debug_span!("atlassian_api", base_url = %base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_filter_falls_back_to_warn() {
        let subscriber = subscriber("not a [valid filter");
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(tracing::Level::WARN));
            assert!(tracing::enabled!(tracing::Level::ERROR));
            assert!(!tracing::enabled!(tracing::Level::INFO));
            assert!(!tracing::enabled!(tracing::Level::DEBUG));
        });
    }

    #[test]
    fn test_filter_is_applied() {
        let subscriber = subscriber("debug");
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(tracing::Level::DEBUG));
            assert!(!tracing::enabled!(tracing::Level::TRACE));
        });
    }
}
