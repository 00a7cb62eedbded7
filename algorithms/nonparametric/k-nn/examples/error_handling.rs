//! Example demonstrating error handling with the nearest-neighbour classifiers.
//!
//! Every contract violation (training on nothing, mixing feature lengths,
//! querying before training, querying with the wrong length) comes back as a
//! `KnnError` instead of a panic.

use class_helpers::{L2Dist, LabeledSample, TrainingSet};
use k_nn::{KnnClassifier, KnnError, NearestNeighbor, SupervisedClassifier};
use ndarray::array;

fn main() {
    println!("Nearest-Neighbour Classifier Error Handling Examples");
    println!("====================================================");

    // Example 1: Query before training
    println!("\n1. Classifying with an untrained classifier:");
    let untrained: NearestNeighbor<&str, f64> = NearestNeighbor::default();
    match untrained.classify(array![1.0, 1.0].view()) {
        Ok(labels) => println!("   Predicted labels: {:?}", labels),
        Err(KnnError::NotTrained) => println!("   ✓ Caught expected error: {}", KnnError::NotTrained),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 2: Empty training set
    println!("\n2. Training on an empty training set:");
    let mut classifier: NearestNeighbor<&str, f64> = NearestNeighbor::default();
    match classifier.train(TrainingSet::new()) {
        Ok(()) => println!("   Classifier trained"),
        Err(e @ KnnError::EmptyTrainingSet) => println!("   ✓ Caught expected error: {}", e),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 3: Mixed feature lengths
    println!("\n3. Training on samples of different lengths:");
    let mixed: TrainingSet<&str, f64> = vec![
        LabeledSample::single(array![1.0, 1.0], "A"),
        LabeledSample::single(array![1.0], "B"),
    ]
    .into();
    match classifier.train(mixed) {
        Ok(()) => println!("   Classifier trained"),
        Err(e @ KnnError::InconsistentArity { .. }) => {
            println!("   ✓ Caught expected error: {}", e)
        }
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 4: Successful prediction, then a query of the wrong length
    println!("\n4. Successful prediction with error handling:");
    let valid: TrainingSet<&str, f64> = vec![
        LabeledSample::single(array![1.0, 1.0], "Class A"),
        LabeledSample::single(array![2.0, 2.0], "Class A"),
        LabeledSample::single(array![8.0, 8.0], "Class B"),
        LabeledSample::single(array![9.0, 8.0], "Class B"),
    ]
    .into();

    match classifier.train(valid) {
        Ok(()) => {
            println!("   ✓ Classifier trained");

            let test_points = vec![
                (array![2.5, 2.5], "should be Class A"),
                (array![7.5, 8.5], "should be Class B"),
            ];
            for (point, expected) in test_points {
                match classifier.classify(point.view()) {
                    Ok(labels) => println!("   ✓ Prediction successful: {:?} ({})", labels, expected),
                    Err(e) => println!("   ✗ Prediction failed: {}", e),
                }
            }

            match classifier.classify(array![2.5].view()) {
                Ok(labels) => println!("   Predicted labels: {:?}", labels),
                Err(e @ KnnError::DimensionMismatch { .. }) => {
                    println!("   ✓ Caught expected error: {}", e)
                }
                Err(e) => println!("   ✗ Unexpected error: {}", e),
            }
        }
        Err(e) => println!("   ✗ Failed to train classifier: {}", e),
    }

    // Example 5: Error propagation in a function
    println!("\n5. Error propagation in functions:");

    fn classify_with_error_handling() -> Result<String, KnnError> {
        let mut training_data = TrainingSet::new();
        training_data.add(array![1.0], "positive");
        training_data.add(array![-1.0], "negative");

        let mut classifier = KnnClassifier::new(1, L2Dist)?;
        classifier.train(training_data)?;
        let labels = classifier.classify(array![0.5].view())?;
        Ok(labels.join(","))
    }

    match classify_with_error_handling() {
        Ok(result) => println!("   ✓ Classification result: {}", result),
        Err(e) => println!("   ✗ Classification failed: {}", e),
    }

    println!("\nAll examples completed successfully!");
}
