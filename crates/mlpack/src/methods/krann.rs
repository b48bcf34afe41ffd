use crate::model::*;

binding! {
    /// Rank-approximate nearest-neighbor search.
    fn krann => "krann";

    /// Optional parameters of [`krann`].
    options KrannOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m RannModel),
            query: matrix,
            reference: matrix,
        }
        params {
            alpha: f64 = 0.95,
            first_leaf_exact: bool = false,
            k: i32 = 0,
            leaf_size: i32 = 20,
            naive: bool = false,
            random_basis: bool = false,
            sample_at_leaves: bool = false,
            seed: i32 = 0,
            single_mode: bool = false,
            single_sample_limit: i32 = 20,
            tau: f64 = 5.0,
            tree_type: String = String::from("kd"),
        }
    }

    /// Outputs of [`krann`].
    output KrannOutput {
        distances: matrix,
        neighbors: umatrix,
        output_model: model(RannModel),
    }
}
