binding! {
    /// Print descriptive statistics of each dimension to the native log.
    ///
    /// Nothing is returned; run with `verbose` to see the table.
    fn preprocess_describe => "preprocess_describe";

    /// Optional parameters of [`preprocess_describe`].
    options PreprocessDescribeOptions {
        required {
            input: matrix,
        }
        inputs {}
        params {
            dimension: i32 = 0,
            population: bool = false,
            precision: i32 = 4,
            row_major: bool = false,
            width: i32 = 8,
        }
    }

    /// Outputs of [`preprocess_describe`].
    output PreprocessDescribeOutput {}
}
