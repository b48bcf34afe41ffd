use crate::model::*;

binding! {
    /// Least angle regression (LARS), LASSO and elastic net.
    fn lars => "lars";

    /// Optional parameters of [`lars`].
    options LarsOptions<'m> {
        required {}
        inputs {
            input: matrix,
            input_model: model(&'m LarsModel),
            responses: matrix,
            test: matrix,
        }
        params {
            lambda1: f64 = 0.0,
            lambda2: f64 = 0.0,
            use_cholesky: bool = false,
        }
    }

    /// Outputs of [`lars`].
    output LarsOutput {
        output_model: model(LarsModel),
        output_predictions: matrix,
    }
}
