//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the subscriber used by every binary built on the
//! framework. The actor loop already logs each request with an `entity_type`
//! field, so the output drops module targets and uses the compact format:
//!
//! ```text
//! INFO Actor started entity_type="Product"
//! INFO Transaction committed entity_type="Product" steps=2
//! INFO order_processing:create_order: Created entity_type="Order" size=1
//! ```
//!
//! Control verbosity with `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # state changes only
//! RUST_LOG=debug cargo run     # full request payloads
//! ```

/// Initializes the global `tracing` subscriber from `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored, which lets tests and
/// binaries share it.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
