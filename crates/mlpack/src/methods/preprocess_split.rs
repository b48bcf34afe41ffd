binding! {
    /// Split a dataset (and optionally its labels) into training and test sets.
    fn preprocess_split => "preprocess_split";

    /// Optional parameters of [`preprocess_split`].
    options PreprocessSplitOptions {
        required {
            input: matrix,
        }
        inputs {
            input_labels: umatrix,
        }
        params {
            no_shuffle: bool = false,
            seed: i32 = 0,
            stratify_data: bool = false,
            /// Fraction of points held out for testing.
            test_ratio: f64 = 0.2,
        }
    }

    /// Outputs of [`preprocess_split`].
    output PreprocessSplitOutput {
        test: matrix,
        test_labels: umatrix,
        training: matrix,
        training_labels: umatrix,
    }
}
