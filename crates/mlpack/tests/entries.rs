//! Behaviour shared by every generated entry: default forwarding, output
//! requests, model ownership and cleanup on every exit path.

mod common;

use std::collections::BTreeSet;

use approx::assert_abs_diff_eq;
use mlpack::methods::{
    kmeans, pca, perceptron, preprocess_binarize, test_binding, KmeansOptions, PcaOptions,
    PerceptronOptions, PreprocessBinarizeOptions, TestBindingOptions,
};
use mlpack::testing::{GaussianKernel, PerceptronWeights};
use mlpack::{Environment, MatrixWithInfo, MlpackError, Runtime};
use ndarray::array;
use rstest::rstest;

use common::{assert_no_leaks, reference, random_matrix, two_clusters, xor};

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Default Forwarding
// =============================================================================

#[test]
fn defaults_are_not_forwarded() {
    let (runtime, bridge) = reference();
    let x = random_matrix(1, 6, 3);

    pca(&runtime, &x, &PcaOptions::new()).unwrap();
    let passed = bridge.last_invocation().unwrap().passed;
    assert_eq!(passed, names(&["input", "output"]));
}

#[test]
fn non_default_values_are_forwarded() {
    let (runtime, bridge) = reference();
    let x = random_matrix(1, 6, 3);

    let options = PcaOptions::builder()
        .new_dimensionality(2)
        .scale(true)
        .decomposition_method("randomized".to_owned())
        .build();
    pca(&runtime, &x, &options).unwrap();
    let passed = bridge.last_invocation().unwrap().passed;
    assert_eq!(
        passed,
        names(&["decomposition_method", "input", "new_dimensionality", "output", "scale"])
    );
}

#[test]
fn explicit_default_matches_omitted() {
    let (runtime, bridge) = reference();
    let x = random_matrix(3, 8, 4);

    let omitted = pca(&runtime, &x, &PcaOptions::new()).unwrap().output.unwrap();
    let first = bridge.last_invocation().unwrap();

    let explicit = PcaOptions::builder()
        .new_dimensionality(0)
        .scale(false)
        .var_to_retain(0.0)
        .decomposition_method("exact".to_owned())
        .build();
    let given = pca(&runtime, &x, &explicit).unwrap().output.unwrap();
    let second = bridge.last_invocation().unwrap();

    assert_eq!(first.passed, second.passed);
    assert_abs_diff_eq!(omitted, given);
}

#[rstest]
#[case::kmeans_iterations(KmeansOptions::builder().max_iterations(1000).build())]
#[case::kmeans_seed(KmeansOptions::builder().seed(0).build())]
#[case::kmeans_algorithm(KmeansOptions::builder().algorithm("naive".to_owned()).build())]
fn kmeans_defaults_are_transparent(#[case] explicit: KmeansOptions) {
    let (runtime, _bridge) = reference();
    let x = two_clusters();

    let a = kmeans(&runtime, 2, &x, &KmeansOptions::new()).unwrap();
    let b = kmeans(&runtime, 2, &x, &explicit).unwrap();
    assert_eq!(a.output, b.output);
    assert_eq!(a.centroid, b.centroid);
}

#[test]
fn builder_defaults_match_default_impl() {
    let built = KmeansOptions::builder().build();
    let default = KmeansOptions::default();
    assert_eq!(built.max_iterations, default.max_iterations);
    assert_eq!(built.percentage, default.percentage);
    assert_eq!(built.algorithm, default.algorithm);
    assert_eq!(default.max_iterations, 1000);
    assert_eq!(default.samplings, 100);
    assert_abs_diff_eq!(default.percentage, 0.02);
    assert!(!default.verbose);
}

#[test]
fn positional_inputs_are_always_forwarded() {
    let (runtime, bridge) = reference();
    kmeans(&runtime, 2, &two_clusters(), &KmeansOptions::new()).unwrap();
    let passed = bridge.last_invocation().unwrap().passed;
    assert_eq!(passed, names(&["centroid", "clusters", "input", "output"]));
}

#[test]
fn dimension_zero_cannot_be_requested() {
    let (runtime, bridge) = reference();
    let x = array![[0.2, 0.8], [0.9, 0.1]];

    let options = PreprocessBinarizeOptions::builder()
        .dimension(0)
        .threshold(0.5)
        .build();
    let out = preprocess_binarize(&runtime, &x, &options).unwrap().output.unwrap();
    assert!(!bridge.last_invocation().unwrap().passed.contains("dimension"));
    assert_eq!(out, array![[0.0, 1.0], [1.0, 0.0]]);

    let options = PreprocessBinarizeOptions::builder()
        .dimension(1)
        .threshold(0.5)
        .build();
    let out = preprocess_binarize(&runtime, &x, &options).unwrap().output.unwrap();
    assert_eq!(out, array![[0.2, 1.0], [0.9, 0.0]]);
}

// =============================================================================
// Test Binding
// =============================================================================

#[test]
fn test_binding_echoes_every_slot_kind() {
    let (runtime, _bridge) = reference();
    let info = MatrixWithInfo::new(array![[1.0, 2.0], [3.0, 4.0]], vec![false, true]).unwrap();
    let options = TestBindingOptions::builder()
        .matrix_in(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])
        .umatrix_in(array![[1.0, 2.0], [3.0, 4.0]])
        .row_in(array![[1.0, 2.0, 3.0]])
        .col_in(array![[1.0], [2.0]])
        .urow_in(array![[1.0, 2.0]])
        .ucol_in(array![[3.0], [4.0]])
        .matrix_and_info_in(info)
        .vector_in(vec![1, 2, 3])
        .str_vector_in(vec!["a".to_owned(), "b".to_owned()])
        .build();

    let out = test_binding(&runtime, 4.0, 12, "hello", &options).unwrap();

    assert_abs_diff_eq!(out.double_out, 5.0);
    assert_eq!(out.int_out, 13);
    assert_eq!(out.string_out, "hello2");
    assert_eq!(out.matrix_out.unwrap(), array![[2.0, 4.0, 6.0], [8.0, 10.0, 12.0]]);
    assert_eq!(out.umatrix_out.unwrap(), array![[2.0, 4.0], [6.0, 8.0]]);
    assert_eq!(out.row_out.unwrap(), array![[2.0, 4.0, 6.0]]);
    assert_eq!(out.col_out.unwrap(), array![[2.0], [4.0]]);
    assert_eq!(out.urow_out.unwrap(), array![[2.0, 4.0]]);
    assert_eq!(out.ucol_out.unwrap(), array![[6.0], [8.0]]);
    // Numeric columns are tripled, categorical ones kept.
    assert_eq!(out.matrix_and_info_out.unwrap(), array![[3.0, 2.0], [9.0, 4.0]]);
    assert_eq!(out.vector_out, vec![1, 2, 3]);
    assert_eq!(out.str_vector_out, vec!["a", "b"]);
    assert!(out.model_out.is_none());
}

#[test]
fn test_binding_omitted_matrices_are_not_produced() {
    let (runtime, _bridge) = reference();
    let out = test_binding(&runtime, 0.0, 0, "", &TestBindingOptions::new()).unwrap();
    let (col, _, _, info, matrix, ..) = out.into_tuple();
    assert!(col.is_none());
    assert!(info.is_none());
    assert!(matrix.is_none());
}

#[test]
fn native_failure_becomes_bridge_error() {
    let (runtime, bridge) = reference();
    let options = TestBindingOptions::builder().flag2(true).build();

    let err = test_binding(&runtime, 0.0, 0, "", &options).unwrap_err();
    match err {
        MlpackError::Bridge { program, reason } => {
            assert_eq!(program, "test_binding");
            assert!(reason.contains("flag2"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_no_leaks(&bridge);
}

#[test]
fn unknown_program_is_a_bridge_error() {
    let runtime = Runtime::reference();
    let err = mlpack::methods::emst(&runtime, &two_clusters(), &Default::default()).unwrap_err();
    assert!(matches!(err, MlpackError::Bridge { ref program, .. } if program == "emst"));
}

// =============================================================================
// Models
// =============================================================================

#[test]
fn model_chain_through_test_binding() {
    let (runtime, bridge) = reference();
    let built = TestBindingOptions::builder().build_model(true).build();
    let first = test_binding(&runtime, 0.0, 0, "", &built)
        .unwrap()
        .model_out
        .unwrap();
    assert_eq!(
        bridge.inspect_model::<GaussianKernel>(first.handle().raw().unwrap()),
        Some(GaussianKernel { bandwidth: 10.0 })
    );

    let options = TestBindingOptions::builder().model_in(&first).build();
    let out = test_binding(&runtime, 0.0, 0, "", &options).unwrap();
    assert_abs_diff_eq!(out.model_bw_out, 10.0);
    let second = out.model_out.unwrap();
    assert_eq!(
        bridge.inspect_model::<GaussianKernel>(second.handle().raw().unwrap()),
        Some(GaussianKernel { bandwidth: 20.0 })
    );
    assert_eq!(bridge.outstanding_models(), 2);

    // A lent model survives the call that used it.
    drop(options);
    assert!(first.handle().raw().is_some());
    drop(second);
    first.release().unwrap();
    assert_eq!(bridge.outstanding_models(), 0);
}

#[test]
fn identical_training_gives_identical_inference() {
    let (runtime, _bridge) = reference();
    let (training, labels) = xor();
    let test = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

    let predict = |runtime: &Runtime| {
        let options = PerceptronOptions::builder()
            .training(training.clone())
            .labels(labels.clone())
            .build();
        let model = perceptron(runtime, &options).unwrap().output_model.unwrap();
        let options = PerceptronOptions::builder()
            .input_model(&model)
            .test(test.clone())
            .build();
        perceptron(runtime, &options).unwrap().predictions.unwrap()
    };

    assert_eq!(predict(&runtime), predict(&runtime));
}

#[test]
fn separable_data_is_learned() {
    let (runtime, bridge) = reference();
    let training = array![[0.0, 0.0], [0.2, 0.1], [5.0, 5.0], [5.2, 4.9]];
    let options = PerceptronOptions::builder()
        .training(training.clone())
        .labels(array![[0.0, 0.0, 1.0, 1.0]])
        .test(training)
        .build();
    let out = perceptron(&runtime, &options).unwrap();
    assert_eq!(out.predictions.unwrap(), array![[0.0, 0.0, 1.0, 1.0]]);

    let model = out.output_model.unwrap();
    let weights = bridge
        .inspect_model::<PerceptronWeights>(model.handle().raw().unwrap())
        .unwrap();
    assert_eq!(weights.weights.dim(), (2, 2));
}

#[test]
fn models_are_released_exactly_once() {
    let (runtime, bridge) = reference();
    let (training, labels) = xor();
    let options = PerceptronOptions::builder()
        .training(training)
        .labels(labels)
        .build();

    let models: Vec<_> = (0..3)
        .map(|_| perceptron(&runtime, &options).unwrap().output_model.unwrap())
        .collect();
    assert_eq!(bridge.outstanding_models(), 3);

    let mut models = models.into_iter();
    models.next().unwrap().release().unwrap();
    assert_eq!(bridge.outstanding_models(), 2);
    drop(models);
    assert_eq!(bridge.outstanding_models(), 0);
}

#[test]
fn failed_call_does_not_leak_produced_models() {
    let (runtime, bridge) = reference();
    let (training, labels) = xor();
    let options = PerceptronOptions::builder()
        .training(training)
        .labels(labels)
        .test(array![[1.0, 2.0, 3.0]])
        .build();

    let err = perceptron(&runtime, &options).unwrap_err();
    assert!(matches!(err, MlpackError::Bridge { .. }));
    assert_eq!(bridge.outstanding_models(), 0);
    assert_no_leaks(&bridge);
}

#[rstest]
#[case::input_released_first(true)]
#[case::output_released_first(false)]
fn returned_input_model_is_released_once(#[case] input_first: bool) {
    let (runtime, bridge) = reference();
    let (training, labels) = xor();
    let options = PerceptronOptions::builder()
        .training(training)
        .labels(labels)
        .build();
    let input = perceptron(&runtime, &options).unwrap().output_model.unwrap();

    let options = PerceptronOptions::builder()
        .input_model(&input)
        .test(array![[0.0, 1.0]])
        .build();
    let output = perceptron(&runtime, &options).unwrap().output_model.unwrap();
    drop(options);

    assert_eq!(output.handle().raw(), input.handle().raw());
    assert!(output.handle().shares_model_with(input.handle()));
    assert_eq!(bridge.outstanding_models(), 1);

    let (first, second) = if input_first {
        (input, output)
    } else {
        (output, input)
    };
    first.release().unwrap();
    assert_eq!(bridge.outstanding_models(), 1);
    assert!(second.handle().raw().is_some());
    second.release().unwrap();
    assert_eq!(bridge.outstanding_models(), 0);
    assert_no_leaks(&bridge);
}

#[test]
fn training_continues_on_the_lent_model() {
    let (runtime, bridge) = reference();
    let options = PerceptronOptions::builder()
        .training(array![[0.0, 0.0], [5.0, 5.0]])
        .labels(array![[0.0, 1.0]])
        .build();
    let model = perceptron(&runtime, &options).unwrap().output_model.unwrap();
    let raw = model.handle().raw().unwrap();
    assert_eq!(
        bridge.inspect_model::<PerceptronWeights>(raw).unwrap().weights.dim(),
        (2, 2)
    );

    let options = PerceptronOptions::builder()
        .input_model(&model)
        .training(array![[0.0, 0.0], [5.0, 5.0], [-5.0, 5.0]])
        .labels(array![[0.0, 1.0, 2.0]])
        .build();
    let continued = perceptron(&runtime, &options).unwrap().output_model.unwrap();
    drop(options);

    assert!(continued.handle().shares_model_with(model.handle()));
    assert_eq!(
        bridge.inspect_model::<PerceptronWeights>(raw).unwrap().weights.dim(),
        (3, 2)
    );
    drop(model);
    drop(continued);
    assert_eq!(bridge.outstanding_models(), 0);
}

#[test]
fn concurrent_training_keeps_models_apart() {
    let (runtime, bridge) = reference();
    let (training, labels) = xor();

    let models: Vec<_> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let runtime = runtime.clone();
                let (training, labels) = (training.clone(), labels.clone());
                scope.spawn(move || {
                    let options = PerceptronOptions::builder()
                        .training(training)
                        .labels(labels)
                        .build();
                    perceptron(&runtime, &options).unwrap().output_model.unwrap()
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    assert_eq!(bridge.outstanding_models(), 4);
    for (i, a) in models.iter().enumerate() {
        for b in &models[i + 1..] {
            assert!(!a.handle().shares_model_with(b.handle()));
        }
    }
    drop(models);
    assert_eq!(bridge.outstanding_models(), 0);
    assert_no_leaks(&bridge);
}

#[test]
fn model_handles_move_across_threads() {
    let (runtime, bridge) = reference();
    let built = TestBindingOptions::builder().build_model(true).build();
    let model = test_binding(&runtime, 0.0, 0, "", &built)
        .unwrap()
        .model_out
        .unwrap();

    let worker_runtime = runtime.clone();
    let bandwidth = std::thread::spawn(move || {
        let options = TestBindingOptions::builder().model_in(&model).build();
        test_binding(&worker_runtime, 0.0, 0, "", &options)
            .unwrap()
            .model_bw_out
    })
    .join()
    .unwrap();

    assert_abs_diff_eq!(bandwidth, 10.0);
    assert_eq!(bridge.outstanding_models(), 0);
}

// =============================================================================
// Verbosity
// =============================================================================

#[test]
fn verbose_is_scoped_to_the_call() {
    let (runtime, bridge) = reference();
    let options = PcaOptions::builder().verbose(true).build();
    let x = random_matrix(5, 4, 2);

    assert!(!runtime.verbose());
    pca(&runtime, &x, &options).unwrap();
    let call = bridge.last_invocation().unwrap();
    assert!(call.verbose);
    assert!(!call.backtrace);
    assert!(call.passed.contains("verbose"));
    assert!(!runtime.verbose());
}

#[test]
fn verbose_flag_survives_quiet_calls() {
    let (runtime, bridge) = reference();
    runtime.bridge().enable_verbose();

    pca(&runtime, &random_matrix(5, 4, 2), &PcaOptions::new()).unwrap();
    assert!(!bridge.last_invocation().unwrap().verbose);
    assert!(runtime.verbose());
}

#[test]
fn verbose_flag_is_restored_after_failure() {
    let (runtime, bridge) = reference();
    let options = TestBindingOptions::builder()
        .flag2(true)
        .verbose(true)
        .build();

    assert!(test_binding(&runtime, 0.0, 0, "", &options).is_err());
    assert!(bridge.last_invocation().unwrap().verbose);
    assert!(!runtime.verbose());
    assert_no_leaks(&bridge);
}

#[test]
fn verbose_cannot_be_enabled_after_close() {
    let (runtime, _bridge) = reference();
    let mut env = Environment::open(&runtime, "noop").unwrap();
    env.invoke().unwrap();
    env.close().unwrap();

    let err = env.enable_verbose().unwrap_err();
    assert!(matches!(err, MlpackError::Lifecycle(_)));
    assert!(!env.is_verbose());
    assert!(!runtime.verbose());
}

#[rstest]
#[case::quiet_loud_closes_first(false, true)]
#[case::quiet_quiet_closes_first(false, false)]
#[case::verbose_loud_closes_first(true, true)]
#[case::verbose_quiet_closes_first(true, false)]
fn overlapping_environments_restore_the_flag(#[case] baseline: bool, #[case] loud_closes_first: bool) {
    let (runtime, _bridge) = reference();
    if baseline {
        runtime.bridge().enable_verbose();
    }

    let mut loud = Environment::open(&runtime, "noop").unwrap();
    loud.enable_verbose().unwrap();
    let mut quiet = Environment::open(&runtime, "noop").unwrap();
    // The quiet environment does not silence its loud neighbour.
    assert!(runtime.verbose());

    if loud_closes_first {
        loud.close().unwrap();
        assert!(!runtime.verbose());
        quiet.close().unwrap();
    } else {
        quiet.close().unwrap();
        assert!(runtime.verbose());
        loud.close().unwrap();
    }
    assert_eq!(runtime.verbose(), baseline);
}

#[test]
fn concurrent_calls_share_one_runtime() {
    let (runtime, bridge) = reference();
    let inputs: Vec<_> = (0..4).map(|seed| random_matrix(seed, 12, 3)).collect();
    let serial: Vec<_> = inputs
        .iter()
        .map(|x| pca(&runtime, x, &PcaOptions::new()).unwrap().output.unwrap())
        .collect();
    let calls_before = bridge.invocations().len();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let workers: Vec<_> = inputs
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let runtime = runtime.clone();
                scope.spawn(move || {
                    let options = PcaOptions::builder().verbose(i % 2 == 0).build();
                    pca(&runtime, x, &options).unwrap().output.unwrap()
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    for (a, b) in serial.into_iter().zip(parallel) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }
    assert_eq!(bridge.invocations().len(), calls_before + 4);
    assert_eq!(runtime.bridge().verbosity().open_environments(), 0);
    assert!(!runtime.verbose());
    assert_no_leaks(&bridge);
}
