//! Infrastructure concerns shared by every layer
//!
//! Log message text and tracing subscriber setup live here so the domain and
//! service code only ever emit events.

pub mod log_messages;
pub mod logging;

pub use logging::init_tracing;
