use crate::model::*;

binding! {
    /// Approximate nearest-neighbor search with locality-sensitive hashing.
    fn lsh => "lsh";

    /// Optional parameters of [`lsh`].
    options LshOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m LshModel),
            query: matrix,
            reference: matrix,
            true_neighbors: umatrix,
        }
        params {
            bucket_size: i32 = 500,
            hash_width: f64 = 0.0,
            k: i32 = 0,
            num_probes: i32 = 0,
            projections: i32 = 10,
            second_hash_size: i32 = 99901,
            seed: i32 = 0,
            tables: i32 = 30,
        }
    }

    /// Outputs of [`lsh`].
    output LshOutput {
        distances: matrix,
        neighbors: umatrix,
        output_model: model(LshModel),
    }
}
