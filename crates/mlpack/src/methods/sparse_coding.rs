use crate::model::*;

binding! {
    /// Sparse coding with dictionary learning.
    fn sparse_coding => "sparse_coding";

    /// Optional parameters of [`sparse_coding`].
    options SparseCodingOptions<'m> {
        required {}
        inputs {
            initial_dictionary: matrix,
            input_model: model(&'m SparseCodingModel),
            test: matrix,
            training: matrix,
        }
        params {
            atoms: i32 = 15,
            lambda1: f64 = 0.0,
            lambda2: f64 = 0.0,
            max_iterations: i32 = 0,
            newton_tolerance: f64 = 1e-06,
            normalize: bool = false,
            objective_tolerance: f64 = 0.01,
            seed: i32 = 0,
        }
    }

    /// Outputs of [`sparse_coding`].
    output SparseCodingOutput {
        codes: matrix,
        dictionary: matrix,
        output_model: model(SparseCodingModel),
    }
}
