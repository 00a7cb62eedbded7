// This is a simple example showing how to use the firclass library
use firclass::{Distance, L2Dist, NearestNeighbor, SupervisedClassifier, TrainingSet};
use ndarray::array;

fn main() {
    println!("firclass library example");

    let mut set = TrainingSet::new();
    set.add(array![1.0, 1.0], "low pass");
    set.add(array![1.0, -1.0], "high pass");
    println!("Training set: {:?}", set);

    let mut classifier = NearestNeighbor::new(L2Dist);
    if let Err(e) = classifier.train(set) {
        eprintln!("Training failed: {}", e);
        return;
    }

    let query = array![0.9, 0.4];
    match classifier.classify(query.view()) {
        Ok(labels) => println!("{:?} classified as {:?}", query, labels),
        Err(e) => eprintln!("Classification failed: {}", e),
    }

    let a = array![0.0, 0.0];
    let b = array![3.0, 4.0];
    match L2Dist.distance(a.view(), b.view()) {
        Ok(d) => println!("Distance between {:?} and {:?}: {}", a, b, d),
        Err(e) => eprintln!("Distance failed: {}", e),
    }
}
