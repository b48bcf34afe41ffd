use crate::model::*;

binding! {
    /// Train or apply an AdaBoost ensemble of weak learners.
    ///
    /// Supply `training` and `labels` to train, or `input_model` to reuse a
    /// model. Predictions on `test` are returned in `predictions`; `output` is
    /// the older name for the same row and is kept for compatibility.
    fn adaboost => "adaboost";

    /// Optional parameters of [`adaboost`].
    options AdaboostOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m AdaBoostModel),
            labels: urow,
            test: matrix,
            training: matrix,
        }
        params {
            iterations: i32 = 1000,
            tolerance: f64 = 1e-10,
            /// `decision_stump` or `perceptron`.
            weak_learner: String = String::from("decision_stump"),
        }
    }

    /// Outputs of [`adaboost`].
    output AdaboostOutput {
        /// Same as `predictions`.
        output: urow,
        output_model: model(AdaBoostModel),
        predictions: urow,
        probabilities: matrix,
    }
}
