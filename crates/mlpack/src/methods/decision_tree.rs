use crate::model::*;

binding! {
    /// Train or apply a decision tree classifier.
    ///
    /// Categorical dimensions are taken from the [`MatrixWithInfo`](crate::MatrixWithInfo)
    /// flags of `training`.
    fn decision_tree => "decision_tree";

    /// Optional parameters of [`decision_tree`].
    options DecisionTreeOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m DecisionTreeModel),
            labels: urow,
            test: matrix_with_info,
            test_labels: urow,
            training: matrix_with_info,
            weights: matrix,
        }
        params {
            /// Zero means unlimited.
            maximum_depth: i32 = 0,
            minimum_gain_split: f64 = 1e-07,
            minimum_leaf_size: i32 = 20,
            print_training_accuracy: bool = false,
            print_training_error: bool = false,
        }
    }

    /// Outputs of [`decision_tree`].
    output DecisionTreeOutput {
        output_model: model(DecisionTreeModel),
        predictions: urow,
        probabilities: matrix,
    }
}
