use crate::model::*;

binding! {
    /// Train or apply a multiclass perceptron.
    ///
    /// Either `training` (with `labels`) or `input_model` must be supplied.
    /// Training on top of `input_model` continues from its weights.
    fn perceptron => "perceptron";

    /// Options for [`perceptron`].
    options PerceptronOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m PerceptronModel),
            labels: urow,
            test: matrix,
            training: matrix,
        }
        params {
            /// Passes over the training data.
            max_iterations: i32 = 1000,
        }
    }

    /// Outputs of [`perceptron`].
    output PerceptronOutput {
        output_model: model(PerceptronModel),
        predictions: urow,
    }
}
