use crate::model::*;

binding! {
    /// Train or apply a binary logistic regression model.
    ///
    /// `output` and `output_probabilities` are older names for
    /// `predictions` and `probabilities`.
    fn logistic_regression => "logistic_regression";

    /// Optional parameters of [`logistic_regression`].
    options LogisticRegressionOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m LogisticRegressionModel),
            labels: urow,
            test: matrix,
            training: matrix,
        }
        params {
            batch_size: i32 = 64,
            decision_boundary: f64 = 0.5,
            lambda: f64 = 0.0,
            max_iterations: i32 = 10000,
            /// `lbfgs` or `sgd`.
            optimizer: String = String::from("lbfgs"),
            step_size: f64 = 0.01,
            tolerance: f64 = 1e-10,
        }
    }

    /// Outputs of [`logistic_regression`].
    output LogisticRegressionOutput {
        /// Same as `predictions`.
        output: urow,
        output_model: model(LogisticRegressionModel),
        /// Same as `probabilities`.
        output_probabilities: matrix,
        predictions: urow,
        probabilities: matrix,
    }
}
