use crate::model::*;

binding! {
    /// Train or apply a random forest classifier.
    fn random_forest => "random_forest";

    /// Optional parameters of [`random_forest`].
    options RandomForestOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m RandomForestModel),
            labels: urow,
            test: matrix,
            test_labels: urow,
            training: matrix,
        }
        params {
            maximum_depth: i32 = 0,
            minimum_gain_split: f64 = 0.0,
            minimum_leaf_size: i32 = 1,
            num_trees: i32 = 10,
            print_training_accuracy: bool = false,
            /// Zero seeds from the current time.
            seed: i32 = 0,
            subspace_dim: i32 = 0,
            warm_start: bool = false,
        }
    }

    /// Outputs of [`random_forest`].
    output RandomForestOutput {
        output_model: model(RandomForestModel),
        predictions: urow,
        probabilities: matrix,
    }
}
