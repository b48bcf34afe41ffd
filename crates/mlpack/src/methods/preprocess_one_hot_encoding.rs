binding! {
    /// One-hot encode the listed dimensions of a matrix.
    fn preprocess_one_hot_encoding => "preprocess_one_hot_encoding";

    /// Optional parameters of [`preprocess_one_hot_encoding`].
    options PreprocessOneHotEncodingOptions {
        required {
            input: matrix_with_info,
        }
        inputs {}
        params {
            dimensions: Vec<i32> = Vec::new(),
        }
    }

    /// Outputs of [`preprocess_one_hot_encoding`].
    output PreprocessOneHotEncodingOutput {
        output: matrix,
    }
}
