use crate::model::*;

binding! {
    /// Bayesian linear regression with ARD-style precision estimation.
    ///
    /// `stds` holds the predictive standard deviation of each test point.
    fn bayesian_linear_regression => "bayesian_linear_regression";

    /// Optional parameters of [`bayesian_linear_regression`].
    options BayesianLinearRegressionOptions<'m> {
        required {}
        inputs {
            input: matrix,
            input_model: model(&'m BayesianLinearRegressionModel),
            responses: row,
            test: matrix,
        }
        params {
            center: bool = false,
            scale: bool = false,
        }
    }

    /// Outputs of [`bayesian_linear_regression`].
    output BayesianLinearRegressionOutput {
        output_model: model(BayesianLinearRegressionModel),
        predictions: matrix,
        stds: matrix,
    }
}
