binding! {
    /// Set every value above `threshold` to one and every other value to zero.
    ///
    /// Only dimension `dimension` is touched when it is given. A dimension of
    /// zero cannot be requested explicitly because it is the default.
    fn preprocess_binarize => "preprocess_binarize";

    /// Optional parameters of [`preprocess_binarize`].
    options PreprocessBinarizeOptions {
        required {
            input: matrix,
        }
        inputs {}
        params {
            dimension: i32 = 0,
            threshold: f64 = 0.0,
        }
    }

    /// Outputs of [`preprocess_binarize`].
    output PreprocessBinarizeOutput {
        output: matrix,
    }
}
