binding! {
    /// Load images into a matrix, or save a matrix as images.
    ///
    /// Without `save`, each file in `input` becomes one row of `output`. With
    /// `save`, each row of `dataset` is written to the matching file.
    fn image_converter => "image_converter";

    /// Optional parameters of [`image_converter`].
    options ImageConverterOptions {
        required {
            input: vec_string,
        }
        inputs {
            dataset: matrix,
        }
        params {
            channels: i32 = 0,
            height: i32 = 0,
            quality: i32 = 90,
            save: bool = false,
            width: i32 = 0,
        }
    }

    /// Outputs of [`image_converter`].
    output ImageConverterOutput {
        output: matrix,
    }
}
