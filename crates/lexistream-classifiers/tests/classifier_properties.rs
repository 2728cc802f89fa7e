//! Property tests for score selection, the SGD model and the projection filter

use lexistream_classifiers::{
    predicted_class, ClassifierConfig, FeatureSchema, OnlineClassifier, ProjectedClassifier,
    ProjectionConfig, SgdClassifier,
};
use lexistream_core::{Polarity, SparseFeatureVector};
use proptest::prelude::*;

const WIDTH: usize = 32;

fn vector_strategy() -> impl Strategy<Value = SparseFeatureVector> {
    prop::collection::btree_map(0usize..WIDTH, -10.0f64..10.0, 0..12).prop_map(|features| {
        SparseFeatureVector::new(features.into_iter().collect(), WIDTH).unwrap()
    })
}

proptest! {
    #[test]
    fn predicted_class_is_an_argmax(scores in prop::collection::vec(-1.0f64..1.0, 1..6)) {
        let index = predicted_class(&scores).unwrap();
        prop_assert!(index < scores.len());
        prop_assert!(scores.iter().all(|&s| s <= scores[index]));
        prop_assert!(scores[..index].iter().all(|&s| s < scores[index]));
    }

    #[test]
    fn log_loss_scores_are_probabilities(
        training in prop::collection::vec((vector_strategy(), any::<bool>()), 0..20),
        probe in vector_strategy(),
    ) {
        let config = ClassifierConfig {
            learning_rate: 0.1,
            ..Default::default()
        };
        let mut sgd = SgdClassifier::new(config).unwrap();
        sgd.configure(&FeatureSchema::binary(WIDTH)).unwrap();
        for (vector, positive) in &training {
            let label = if *positive { Polarity::Positive } else { Polarity::Negative };
            sgd.train(vector, label).unwrap();
        }

        let scores = sgd.predict(&probe).unwrap();
        prop_assert_eq!(scores.len(), 2);
        prop_assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
        prop_assert!((scores[0] + scores[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn projection_is_non_negative_and_bounded(
        vector in vector_strategy(),
        percent in 1u32..=100,
        seed in any::<u64>(),
    ) {
        let sgd = SgdClassifier::new(ClassifierConfig::default()).unwrap();
        let mut filter = ProjectedClassifier::new(sgd, ProjectionConfig { percent, seed }).unwrap();
        filter.configure(&FeatureSchema::binary(WIDTH)).unwrap();

        let projected = filter.project(&vector).unwrap();
        prop_assert_eq!(projected.label_dimension(), filter.projected_width());
        let width = filter.projected_width();
        prop_assert!(projected.features().iter().all(|&(d, v)| d < width && v > 0.0));
    }
}
