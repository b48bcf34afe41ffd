use crate::model::*;

binding! {
    /// Density estimation with density estimation trees.
    fn det => "det";

    /// Optional parameters of [`det`].
    options DetOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m DetModel),
            test: matrix,
            training: matrix,
        }
        params {
            folds: i32 = 10,
            max_leaf_size: i32 = 10,
            min_leaf_size: i32 = 5,
            path_format: String = String::from("lr"),
            skip_pruning: bool = false,
        }
    }

    /// Outputs of [`det`].
    output DetOutput {
        output_model: model(DetModel),
        tag_counters_file: string,
        tag_file: string,
        test_set_estimates: matrix,
        training_set_estimates: matrix,
        vi: matrix,
    }
}
