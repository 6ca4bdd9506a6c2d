//! Identifiers for entities created during a dashboard session
//!
//! Each identifier is a newtype around UUID v7, so ids are unique within a
//! session and sort in creation order.

use nutype::nutype;
use uuid::Uuid;

/// Unique identifier of a single prediction
#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRef
))]
pub struct PredictionId(Uuid);

impl PredictionId {
    pub fn generate() -> Self {
        Self::new(Uuid::now_v7())
    }
}

impl Default for PredictionId {
    fn default() -> Self {
        Self::generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn prediction_id_generation_is_unique() {
        let ids: HashSet<_> = (0..1000).map(|_| PredictionId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn prediction_ids_are_time_ordered() {
        let first = PredictionId::generate();
        let second = PredictionId::generate();
        assert!(first < second);
        assert_eq!(first.as_ref().get_version_num(), 7);
    }
}
