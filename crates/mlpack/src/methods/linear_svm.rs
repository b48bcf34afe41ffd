use crate::model::*;

binding! {
    /// Train or apply a linear SVM classifier.
    fn linear_svm => "linear_svm";

    /// Optional parameters of [`linear_svm`].
    options LinearSvmOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m LinearSvmModel),
            labels: urow,
            test: matrix,
            test_labels: urow,
            training: matrix,
        }
        params {
            delta: f64 = 1.0,
            epochs: i32 = 50,
            lambda: f64 = 0.0001,
            max_iterations: i32 = 10000,
            no_intercept: bool = false,
            num_classes: i32 = 0,
            /// `lbfgs` or `psgd`.
            optimizer: String = String::from("lbfgs"),
            seed: i32 = 0,
            shuffle: bool = false,
            step_size: f64 = 0.01,
            tolerance: f64 = 1e-10,
        }
    }

    /// Outputs of [`linear_svm`].
    output LinearSvmOutput {
        output_model: model(LinearSvmModel),
        predictions: urow,
        probabilities: matrix,
    }
}
