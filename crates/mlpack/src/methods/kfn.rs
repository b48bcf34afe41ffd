use crate::model::*;

binding! {
    /// Exact (or epsilon-approximate) k-furthest-neighbor search.
    fn kfn => "kfn";

    /// Optional parameters of [`kfn`].
    options KfnOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m KfnModel),
            query: matrix,
            reference: matrix,
            true_distances: matrix,
            true_neighbors: umatrix,
        }
        params {
            algorithm: String = String::from("dual_tree"),
            epsilon: f64 = 0.0,
            k: i32 = 0,
            leaf_size: i32 = 20,
            percentage: f64 = 1.0,
            random_basis: bool = false,
            seed: i32 = 0,
            tree_type: String = String::from("kd"),
        }
    }

    /// Outputs of [`kfn`].
    output KfnOutput {
        distances: matrix,
        neighbors: umatrix,
        output_model: model(KfnModel),
    }
}
