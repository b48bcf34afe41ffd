use crate::model::*;

binding! {
    /// Most probable hidden state sequence for an observation sequence.
    fn hmm_viterbi => "hmm_viterbi";

    /// Optional parameters of [`hmm_viterbi`].
    options HmmViterbiOptions {
        required {
            input: matrix,
            input_model: model(&HmmModel),
        }
        inputs {}
        params {}
    }

    /// Outputs of [`hmm_viterbi`].
    output HmmViterbiOutput {
        output: umatrix,
    }
}
