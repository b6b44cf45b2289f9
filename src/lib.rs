#![doc(test(attr(deny(warnings))))]

//! Listing Core offers the property-creation wizard, draft store, image
//! gallery, and stay-pricing primitives that power the retreat
//! marketplace's listing workflows and CLIs.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod draft;
pub mod errors;
pub mod images;
pub mod pricing;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Listing Core tracing initialized.");
    });
}
