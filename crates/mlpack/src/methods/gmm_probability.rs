use crate::model::*;

binding! {
    /// Probability of each point under a Gaussian mixture model.
    fn gmm_probability => "gmm_probability";

    /// Optional parameters of [`gmm_probability`].
    options GmmProbabilityOptions {
        required {
            input: matrix,
            input_model: model(&GmmModel),
        }
        inputs {}
        params {}
    }

    /// Outputs of [`gmm_probability`].
    output GmmProbabilityOutput {
        output: matrix,
    }
}
