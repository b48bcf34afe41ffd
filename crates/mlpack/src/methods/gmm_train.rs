use crate::model::*;

binding! {
    /// Fit a Gaussian mixture model with EM.
    ///
    /// Initial means come from k-means; `refined_start` uses Bradley-Fayyad
    /// sampling for that step.
    fn gmm_train => "gmm_train";

    /// Optional parameters of [`gmm_train`].
    options GmmTrainOptions<'m> {
        required {
            gaussians: int,
            input: matrix,
        }
        inputs {
            input_model: model(&'m GmmModel),
        }
        params {
            diagonal_covariance: bool = false,
            kmeans_max_iterations: i32 = 1000,
            max_iterations: i32 = 250,
            no_force_positive: bool = false,
            noise: f64 = 0.0,
            percentage: f64 = 0.02,
            refined_start: bool = false,
            samplings: i32 = 100,
            /// Zero seeds from the current time.
            seed: i32 = 0,
            tolerance: f64 = 1e-10,
            trials: i32 = 1,
        }
    }

    /// Outputs of [`gmm_train`].
    output GmmTrainOutput {
        output_model: model(GmmModel),
    }
}
