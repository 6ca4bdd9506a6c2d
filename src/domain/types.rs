//! Validated value types for the sentiment pipeline
//!
//! Scores, counts and identifiers are wrapped in newtypes so that range
//! checks happen once, at construction, and never again downstream.

use chrono::{DateTime, Utc};
use nutype::nutype;
#[allow(unused_imports)] // These are used by nutype derive macros
use serde::{Deserialize, Serialize};

/// Format used to stamp model versions: sortable, digits only
pub const MODEL_VERSION_FORMAT: &str = "%Y%m%d%H%M%S";

/// Number of digits in a stamped model version
pub const MODEL_VERSION_LEN: usize = 14;

/// Simulated certainty of a sentiment classification (0.0 to 1.0)
#[nutype(
    validate(finite, greater_or_equal = 0.0, less_or_equal = 1.0),
    derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)
)]
pub struct Confidence(f64);

/// Simulated quality of the current model (0.0 to 1.0)
#[nutype(
    validate(finite, greater_or_equal = 0.0, less_or_equal = 1.0),
    derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)
)]
pub struct Accuracy(f64);

/// Generic proportion such as the positive ratio or the error rate
#[nutype(
    validate(finite, greater_or_equal = 0.0, less_or_equal = 1.0),
    derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)
)]
pub struct Ratio(f64);

/// Running total of predictions served
#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
    From,
    AsRef
))]
pub struct PredictionCount(u64);

impl PredictionCount {
    /// Add `increment` predictions, saturating at `u64::MAX`
    pub fn add(self, increment: u64) -> Self {
        Self::new(self.into_inner().saturating_add(increment))
    }
}

/// Observed request throughput
#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
    From,
    AsRef
))]
pub struct RequestsPerHour(u32);

/// Identifier of a trained model
///
/// Limited to 200 characters, enough for generated ids and UUIDs alike.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 200),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Serialize,
        Deserialize,
        AsRef,
        Display
    )
)]
pub struct ModelId(String);

/// Version label of a trained model
///
/// Locally trained models are stamped `20241227143052`; remote trainers may
/// use other sortable labels such as `20241227_143052`.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 100),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Serialize,
        Deserialize,
        AsRef,
        Display
    )
)]
pub struct ModelVersion(String);

impl ModelVersion {
    /// Stamp a version from a point in time
    pub fn stamped_at(at: DateTime<Utc>) -> Self {
        Self::try_new(at.format(MODEL_VERSION_FORMAT).to_string())
            .expect("formatted timestamps are never empty")
    }

    /// Whether this version was stamped by [`ModelVersion::stamped_at`]
    pub fn is_timestamp(&self) -> bool {
        let v = self.as_ref();
        v.len() == MODEL_VERSION_LEN && v.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Text submitted for sentiment classification
///
/// The text is kept as entered; only its trimmed form has to be non-empty.
#[nutype(
    validate(predicate = |t: &str| !t.trim().is_empty()),
    derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRef, Display)
)]
pub struct PredictionText(String);

/// Probability that a simulated call fails (0.0 to 1.0)
#[nutype(
    validate(finite, greater_or_equal = 0.0, less_or_equal = 1.0),
    derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)
)]
pub struct FailureRate(f64);

impl FailureRate {
    /// Calls never fail
    pub fn never() -> Self {
        Self::try_new(0.0).expect("0.0 is a valid failure rate")
    }

    /// Calls always fail
    pub fn always() -> Self {
        Self::try_new(1.0).expect("1.0 is a valid failure rate")
    }
}
