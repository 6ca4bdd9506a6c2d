//! Prediction results and the records kept in the recent-predictions panel

use crate::domain::{
    identifiers::PredictionId,
    sentiment::Sentiment,
    types::{Confidence, PredictionText},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one classification call
///
/// Held by the dashboard only until the next prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    #[serde(alias = "prediction_id")]
    pub prediction_id: PredictionId,
    pub sentiment: Sentiment,
    pub confidence: Confidence,
    pub timestamp: DateTime<Utc>,
}

/// Entry of the recent-predictions panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub id: PredictionId,
    pub text: PredictionText,
    pub sentiment: Sentiment,
    pub confidence: Confidence,
    pub timestamp: DateTime<Utc>,
}

impl PredictionRecord {
    /// Build the record for a finished prediction, sharing its id
    pub fn from_result(text: PredictionText, result: &PredictionResult) -> Self {
        Self {
            id: result.prediction_id,
            text,
            sentiment: result.sentiment,
            confidence: result.confidence,
            timestamp: result.timestamp,
        }
    }

    /// Records shown before any prediction is made, oldest first
    pub fn seeded(now: DateTime<Utc>) -> Vec<Self> {
        [
            ("Good value for money", Sentiment::Positive, 0.85, 8),
            ("Not satisfied with the quality", Sentiment::Negative, 0.78, 5),
            ("This product is amazing!", Sentiment::Positive, 0.92, 2),
        ]
        .into_iter()
        .map(|(text, sentiment, confidence, minutes_ago)| Self {
            id: PredictionId::generate(),
            text: PredictionText::try_new(text.to_string()).expect("seed texts are not blank"),
            sentiment,
            confidence: Confidence::try_new(confidence).expect("seed confidences are in range"),
            timestamp: now - Duration::minutes(minutes_ago),
        })
        .collect()
    }

    /// Attach a human-readable age relative to `now`
    pub fn displayed(&self, now: DateTime<Utc>) -> DisplayedPrediction {
        DisplayedPrediction {
            record: self.clone(),
            display_time: relative_display_time(self.timestamp, now),
        }
    }
}

/// A prediction record together with its display time
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedPrediction {
    #[serde(flatten)]
    pub record: PredictionRecord,
    pub display_time: String,
}

/// Render the age of `at` as seen from `now`, e.g. `Just now` or `5 mins ago`
pub fn relative_display_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(at);

    if age < Duration::minutes(1) {
        return "Just now".to_string();
    }

    let (amount, unit) = if age < Duration::hours(1) {
        (age.num_minutes(), "min")
    } else if age < Duration::days(1) {
        (age.num_hours(), "hour")
    } else {
        (age.num_days(), "day")
    };

    if amount == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}
