use crate::model::*;

binding! {
    /// Ordinary or ridge linear regression.
    fn linear_regression => "linear_regression";

    /// Optional parameters of [`linear_regression`].
    options LinearRegressionOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m LinearRegressionModel),
            test: matrix,
            training: matrix,
            training_responses: row,
        }
        params {
            lambda: f64 = 0.0,
        }
    }

    /// Outputs of [`linear_regression`].
    output LinearRegressionOutput {
        output_model: model(LinearRegressionModel),
        output_predictions: row,
    }
}
