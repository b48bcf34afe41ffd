//! End-to-end scenarios run against the reference bridge.

mod common;

use approx::assert_abs_diff_eq;
use mlpack::methods::{kmeans, pca, perceptron, KmeansOptions, PcaOptions, PerceptronOptions};
use mlpack::{Environment, Flavor, MlpackError};
use ndarray::{array, Axis};

use common::{assert_no_leaks, reference, random_matrix, two_clusters, xor};

#[test]
fn classifier_trains_and_predicts_with_captured_model() {
    let (runtime, bridge) = reference();
    let (training, labels) = xor();

    let options = PerceptronOptions::builder()
        .training(training)
        .labels(labels)
        .build();
    let trained = perceptron(&runtime, &options).unwrap();
    assert!(trained.predictions.is_none());
    let model = trained.output_model.expect("training produces a model");

    let test = array![[0.0, 0.0], [1.0, 1.0]];
    let options = PerceptronOptions::builder()
        .input_model(&model)
        .test(test)
        .build();
    let predictions = perceptron(&runtime, &options)
        .unwrap()
        .predictions
        .expect("predictions requested");

    assert_eq!(predictions.dim(), (1, 2));
    for &p in &predictions {
        assert_eq!(p, p.trunc());
        assert!(p >= 0.0);
    }
    assert_no_leaks(&bridge);
}

#[test]
fn pca_reduces_to_requested_dimensionality() {
    let (runtime, bridge) = reference();
    let x = random_matrix(42, 10, 5);

    let options = PcaOptions::builder().new_dimensionality(2).build();
    let reduced = pca(&runtime, &x, &options).unwrap().output.unwrap();
    assert_eq!(reduced.dim(), (10, 2));

    let kept = pca(&runtime, &x, &PcaOptions::new()).unwrap().output.unwrap();
    assert_eq!(kept.nrows(), 10);
    assert!(kept.ncols() <= 5);
    assert_no_leaks(&bridge);
}

#[test]
fn pca_projection_preserves_total_variance() {
    let (runtime, _bridge) = reference();
    let x = random_matrix(7, 12, 3);
    let projected = pca(&runtime, &x, &PcaOptions::new()).unwrap().output.unwrap();

    let variance = |m: &ndarray::Array2<f64>| m.var_axis(Axis(0), 1.0).sum();
    assert_abs_diff_eq!(variance(&projected), variance(&x), epsilon = 1e-8);
}

#[test]
fn kmeans_separates_two_clusters() {
    let (runtime, bridge) = reference();
    let x = two_clusters();

    let options = KmeansOptions::builder().labels_only(true).build();
    let out = kmeans(&runtime, 2, &x, &options).unwrap();

    let centroids = out.centroid.unwrap();
    assert_eq!(centroids.dim(), (2, 2));

    // A single native row of assignments comes back as one host column.
    let assignments = out.output.unwrap().reversed_axes();
    assert_eq!(assignments.dim(), (1, 6));
    let labels: Vec<f64> = assignments.iter().copied().collect();
    assert!(labels[..3].iter().all(|&l| l == labels[0]));
    assert!(labels[3..].iter().all(|&l| l == labels[3]));
    assert_ne!(labels[0], labels[3]);
    assert_no_leaks(&bridge);
}

#[test]
fn kmeans_appends_assignments_without_labels_only() {
    let (runtime, _bridge) = reference();
    let x = two_clusters();
    let out = kmeans(&runtime, 2, &x, &KmeansOptions::new()).unwrap();

    let output = out.output.unwrap();
    assert_eq!(output.dim(), (6, 3));
    assert_abs_diff_eq!(output.slice(ndarray::s![.., ..2]), x.view());
}

#[test]
fn negative_label_is_rejected_without_leaking() {
    let (runtime, bridge) = reference();
    let (training, _) = xor();
    let options = PerceptronOptions::builder()
        .training(training)
        .labels(array![[0.0, -1.0, 1.0, 0.0]])
        .build();

    let err = perceptron(&runtime, &options).unwrap_err();
    assert!(matches!(err, MlpackError::Domain { ref name, value } if name == "labels" && value == -1.0));
    assert_no_leaks(&bridge);
    assert_eq!(bridge.outstanding_models(), 0);
    assert!(bridge.invocations().is_empty());
}

#[test]
fn non_vector_is_rejected_for_row_slot() {
    let (runtime, bridge) = reference();
    let mut env = Environment::open(&runtime, "noop").unwrap();
    let m = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];

    let err = env.push_matrix("r", m.view(), Flavor::Row).unwrap_err();
    assert!(matches!(
        err,
        MlpackError::Shape { flavor: Flavor::Row, rows: 2, cols: 3, .. }
    ));
    env.close().unwrap();
    assert_no_leaks(&bridge);
}

#[test]
fn closed_environment_rejects_reads() {
    let (runtime, bridge) = reference();
    let mut env = Environment::open(&runtime, "noop").unwrap();
    env.set_int("k", 3).unwrap();
    env.invoke().unwrap();
    assert_eq!(env.get_int("k").unwrap(), 3);
    env.close().unwrap();

    assert!(matches!(env.get_int("k"), Err(MlpackError::Lifecycle(_))));
    assert!(matches!(
        env.pull_matrix("k", Flavor::Matrix),
        Err(MlpackError::Lifecycle(_))
    ));
    assert!(matches!(env.close(), Err(MlpackError::Lifecycle(_))));
    assert_no_leaks(&bridge);
}
