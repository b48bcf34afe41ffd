use crate::model::*;

binding! {
    /// Log-likelihood of a sequence under an HMM.
    fn hmm_loglik => "hmm_loglik";

    /// Optional parameters of [`hmm_loglik`].
    options HmmLoglikOptions {
        required {
            input: matrix,
            input_model: model(&HmmModel),
        }
        inputs {}
        params {}
    }

    /// Outputs of [`hmm_loglik`].
    output HmmLoglikOutput {
        log_likelihood: double,
    }
}
