use crate::model::*;

binding! {
    /// Generate an observation sequence and its hidden states from an HMM.
    fn hmm_generate => "hmm_generate";

    /// Optional parameters of [`hmm_generate`].
    options HmmGenerateOptions {
        required {
            length: int,
            model: model(&HmmModel),
        }
        inputs {}
        params {
            seed: i32 = 0,
            start_state: i32 = 0,
        }
    }

    /// Outputs of [`hmm_generate`].
    output HmmGenerateOutput {
        output: matrix,
        /// Hidden state of each generated observation.
        state: umatrix,
    }
}
