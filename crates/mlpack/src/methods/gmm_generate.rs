use crate::model::*;

binding! {
    /// Sample points from a trained Gaussian mixture model.
    fn gmm_generate => "gmm_generate";

    /// Optional parameters of [`gmm_generate`].
    options GmmGenerateOptions {
        required {
            input_model: model(&GmmModel),
            samples: int,
        }
        inputs {}
        params {
            seed: i32 = 0,
        }
    }

    /// Outputs of [`gmm_generate`].
    output GmmGenerateOutput {
        output: matrix,
    }
}
