use crate::model::*;

binding! {
    /// Train or apply a naive Bayes classifier.
    fn nbc => "nbc";

    /// Optional parameters of [`nbc`].
    options NbcOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m NbcModel),
            labels: urow,
            test: matrix,
            training: matrix,
        }
        params {
            incremental_variance: bool = false,
        }
    }

    /// Outputs of [`nbc`].
    output NbcOutput {
        output_model: model(NbcModel),
        predictions: urow,
        probabilities: matrix,
    }
}
