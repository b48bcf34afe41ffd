use crate::model::*;

binding! {
    /// Train or apply a decision stump.
    fn decision_stump => "decision_stump";

    /// Optional parameters of [`decision_stump`].
    options DecisionStumpOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m DecisionStumpModel),
            labels: urow,
            test: matrix,
            training: matrix,
        }
        params {
            bucket_size: i32 = 6,
        }
    }

    /// Outputs of [`decision_stump`].
    output DecisionStumpOutput {
        output_model: model(DecisionStumpModel),
        predictions: urow,
    }
}
