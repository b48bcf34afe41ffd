use crate::model::*;

binding! {
    /// k-nearest-neighbor search.
    ///
    /// Pass `reference` to build a tree and `query` to search it, or reuse
    /// a tree with `input_model`.
    fn knn => "knn";

    /// Optional parameters of [`knn`].
    options KnnOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m KnnModel),
            query: matrix,
            reference: matrix,
            true_distances: matrix,
            true_neighbors: umatrix,
        }
        params {
            algorithm: String = String::from("dual_tree"),
            /// Relative error bound for approximate search.
            epsilon: f64 = 0.0,
            k: i32 = 0,
            leaf_size: i32 = 20,
            random_basis: bool = false,
            rho: f64 = 0.7,
            seed: i32 = 0,
            tau: f64 = 0.0,
            /// One of `kd`, `vp`, `rp`, `max-rp`, `ub`, `cover`, `r`, `r-star`, `x`, `ball`, `hilbert-r`, `r-plus`, `r-plus-plus`, `spill` or `oct`.
            tree_type: String = String::from("kd"),
        }
    }

    /// Outputs of [`knn`].
    output KnnOutput {
        distances: matrix,
        neighbors: umatrix,
        output_model: model(KnnModel),
    }
}
