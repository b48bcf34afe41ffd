use crate::model::*;

binding! {
    /// Train a hidden Markov model from sequences listed in a file.
    ///
    /// `input_file` names a file that lists one sequence file per line (or,
    /// without `batch`, is itself the single sequence). Labelled training is
    /// used when `labels_file` is set.
    fn hmm_train => "hmm_train";

    /// Optional parameters of [`hmm_train`].
    options HmmTrainOptions<'m> {
        required {
            input_file: string,
        }
        inputs {
            input_model: model(&'m HmmModel),
        }
        params {
            batch: bool = false,
            gaussians: i32 = 0,
            labels_file: String = String::new(),
            seed: i32 = 0,
            states: i32 = 0,
            tolerance: f64 = 1e-05,
            /// Emission distribution: `discrete`, `gaussian`, `gmm` or `diag_gmm`.
            hmm_type as "type": String = String::from("gaussian"),
        }
    }

    /// Outputs of [`hmm_train`].
    output HmmTrainOutput {
        output_model: model(HmmModel),
    }
}
