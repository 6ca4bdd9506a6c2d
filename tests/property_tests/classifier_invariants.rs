//! Classifier and simulated backend properties

use proptest::prelude::*;
use sentiment_ops::domain::sentiment::POSITIVE_TRIGGER_WORDS;
use sentiment_ops::domain::{ModelInfo, PredictionText, Sentiment};
use sentiment_ops::services::{
    PredictionService, SimulatedPredictor, SimulatedTrainer, SimulationProfile, TrainingService,
};

// Property test generators
pub mod generators {
    use super::*;
    use proptest::string::string_regex;

    /// Trigger word in random letter case
    pub fn trigger_word() -> impl Strategy<Value = String> {
        (prop::sample::select(POSITIVE_TRIGGER_WORDS.to_vec()), any::<u64>()).prop_map(
            |(word, mask)| {
                word.chars()
                    .enumerate()
                    .map(|(i, c)| {
                        if mask >> (i % 64) & 1 == 1 {
                            c.to_ascii_uppercase()
                        } else {
                            c
                        }
                    })
                    .collect()
            },
        )
    }

    /// Printable ASCII filler
    pub fn filler() -> impl Strategy<Value = String> {
        string_regex("[ -~]{0,40}").unwrap()
    }

    /// Text that cannot contain any trigger word: no `a`, `e`, `g` or `t`
    pub fn neutral_text() -> impl Strategy<Value = String> {
        string_regex("[bcdfhijklmnopqrsuvwxyzBCDFHIJKLMNOPQRSUVWXYZ0-9 .,!?]{0,80}").unwrap()
    }

    /// Non-empty text accepted by the dashboard
    pub fn prediction_text() -> impl Strategy<Value = PredictionText> {
        string_regex("[ -~]{1,80}")
            .unwrap()
            .prop_filter_map("blank text", |s| PredictionText::try_new(s).ok())
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_trigger_word_anywhere_is_positive(
        prefix in generators::filler(),
        word in generators::trigger_word(),
        suffix in generators::filler(),
    ) {
        let text = format!("{prefix}{word}{suffix}");
        prop_assert_eq!(Sentiment::classify(&text), Sentiment::Positive);
    }

    #[test]
    fn prop_text_without_triggers_is_negative(text in generators::neutral_text()) {
        prop_assert_eq!(Sentiment::classify(&text), Sentiment::Negative);
    }

    #[test]
    fn prop_classification_ignores_ascii_case(text in "[ -~]{0,80}") {
        prop_assert_eq!(
            Sentiment::classify(&text),
            Sentiment::classify(&text.to_ascii_uppercase())
        );
    }

    #[test]
    fn prop_whitespace_only_text_is_rejected(text in "[ \t\n\r]{0,20}") {
        prop_assert!(PredictionText::try_new(text).is_err());
    }

    #[test]
    fn prop_simulated_prediction_is_well_formed(
        seed in any::<u64>(),
        text in generators::prediction_text(),
    ) {
        let predictor = SimulatedPredictor::seeded(&SimulationProfile::instant(), seed);
        let result = runtime().block_on(predictor.predict(&text)).unwrap();

        let confidence = result.confidence.into_inner();
        prop_assert!((0.7..1.0).contains(&confidence));
        prop_assert_eq!(result.sentiment, Sentiment::classify(text.as_ref()));
    }

    #[test]
    fn prop_simulated_training_stays_in_range(seed in any::<u64>()) {
        let trainer = SimulatedTrainer::seeded(&SimulationProfile::instant(), seed);
        let current = ModelInfo::seed();
        let trained = runtime().block_on(trainer.train(&current)).unwrap();

        let accuracy = trained.accuracy.into_inner();
        prop_assert!((0.88..0.98).contains(&accuracy));
        prop_assert_eq!(&trained.id, &current.id);
        prop_assert_eq!(trained.status, current.status);
        prop_assert!(trained.version.is_timestamp());
    }
}
