use crate::model::*;

binding! {
    /// Scale features with one of several scalers, or invert a previous scaling.
    fn preprocess_scale => "preprocess_scale";

    /// Optional parameters of [`preprocess_scale`].
    options PreprocessScaleOptions<'m> {
        required {
            input: matrix,
        }
        inputs {
            input_model: model(&'m ScalingModel),
        }
        params {
            epsilon: f64 = 1e-06,
            inverse_scaling: bool = false,
            max_value: i32 = 1,
            min_value: i32 = 0,
            /// `min_max_scaler`, `mean_normalization`, `max_abs_scaler`, `standard_scaler`, `pca_whitening` or `zca_whitening`.
            scaler_method: String = String::from("standard_scaler"),
            seed: i32 = 0,
        }
    }

    /// Outputs of [`preprocess_scale`].
    output PreprocessScaleOutput {
        output: matrix,
        output_model: model(ScalingModel),
    }
}
