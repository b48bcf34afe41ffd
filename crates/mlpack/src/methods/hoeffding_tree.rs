use crate::model::*;

binding! {
    /// Train or apply a streaming Hoeffding tree.
    fn hoeffding_tree => "hoeffding_tree";

    /// Optional parameters of [`hoeffding_tree`].
    options HoeffdingTreeOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m HoeffdingTreeModel),
            labels: urow,
            test: matrix_with_info,
            test_labels: urow,
            training: matrix_with_info,
        }
        params {
            batch_mode: bool = false,
            bins: i32 = 10,
            confidence: f64 = 0.95,
            info_gain: bool = false,
            max_samples: i32 = 5000,
            min_samples: i32 = 100,
            /// `binary` or `domingos`.
            numeric_split_strategy: String = String::from("binary"),
            observations_before_binning: i32 = 100,
            passes: i32 = 1,
        }
    }

    /// Outputs of [`hoeffding_tree`].
    output HoeffdingTreeOutput {
        output_model: model(HoeffdingTreeModel),
        predictions: urow,
        probabilities: matrix,
    }
}
