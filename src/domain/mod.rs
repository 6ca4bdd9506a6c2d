//! Domain types for the sentiment pipeline dashboard
//!
//! Everything here is plain data plus the pure rules over it: the keyword
//! classifier, the bounded history, relative display times. Timers, tasks and
//! I/O live in the `services` and `dashboard` modules.

pub mod alert;
pub mod history;
pub mod identifiers;
pub mod metrics;
pub mod model;
pub mod prediction;
pub mod sentiment;
pub mod tab;
pub mod types;

pub use alert::{Alert, AlertKind, AlertMessage, AlertSeverity};
pub use history::{BoundedHistory, RECENT_ALERTS_CAPACITY, RECENT_PREDICTIONS_CAPACITY};
pub use identifiers::PredictionId;
pub use metrics::{Metrics, ModelMetrics, PredictionMetrics};
pub use model::{ModelInfo, ModelStatus};
pub use prediction::{DisplayedPrediction, PredictionRecord, PredictionResult};
pub use sentiment::Sentiment;
pub use tab::Tab;
pub use types::*;

/// Newest-first panel of recent predictions
pub type RecentPredictions = BoundedHistory<PredictionRecord>;
