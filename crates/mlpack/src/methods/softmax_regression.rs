use crate::model::*;

binding! {
    /// Train or apply a softmax regression classifier.
    fn softmax_regression => "softmax_regression";

    /// Optional parameters of [`softmax_regression`].
    options SoftmaxRegressionOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m SoftmaxRegressionModel),
            labels: urow,
            test: matrix,
            test_labels: urow,
            training: matrix,
        }
        params {
            lambda: f64 = 0.0001,
            max_iterations: i32 = 400,
            no_intercept: bool = false,
            number_of_classes: i32 = 0,
        }
    }

    /// Outputs of [`softmax_regression`].
    output SoftmaxRegressionOutput {
        output_model: model(SoftmaxRegressionModel),
        predictions: urow,
        probabilities: matrix,
    }
}
