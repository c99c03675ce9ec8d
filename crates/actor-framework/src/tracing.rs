//! # Observability
//!
//! Subscriber setup shared by every binary built on the framework.
//!
//! Every actor logs its requests with an `entity_type` field and the entity id, and
//! clients open spans through `#[tracing::instrument]`, so one admission shows up
//! as a nested trail:
//!
//! ```text
//! INFO place_order: Admission started lines=2
//! INFO place_order: Action ok entity_type="Product" id=product_1
//! WARN place_order: Rolling back reservations count=1
//! ```
//!
//! Verbosity comes from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # one line per state change
//! RUST_LOG=debug cargo run     # full request payloads
//! ```

use tracing_subscriber::EnvFilter;

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are ignored, which keeps tests that
/// each initialise logging from panicking.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type already says where a line came from
        .compact()
        .try_init();
}
