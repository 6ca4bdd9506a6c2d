//! The dashboard: owner of all displayed state
//!
//! A [`Dashboard`] runs as a single task. Clients interact with it through a
//! cloneable [`DashboardHandle`]; long-running operations hand back a
//! [`PendingOutcome`] once accepted.

pub mod actor;
pub mod error;
pub mod handle;
pub mod state;

pub use actor::{Dashboard, DashboardConfig};
pub use error::{DashboardError, DashboardResult};
pub use handle::{DashboardHandle, PendingOutcome};
pub use state::{DashboardSnapshot, DashboardState, PredictState, PredictionOrigin, TrainingState};
