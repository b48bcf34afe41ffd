use crate::model::*;

binding! {
    /// Approximate furthest-neighbor search with DrusillaSelect or QDAFN.
    fn approx_kfn => "approx_kfn";

    /// Optional parameters of [`approx_kfn`].
    options ApproxKfnOptions<'m> {
        required {}
        inputs {
            exact_distances: matrix,
            input_model: model(&'m ApproxKfnModel),
            query: matrix,
            reference: matrix,
        }
        params {
            /// `ds` (DrusillaSelect) or `qdafn`.
            algorithm: String = String::from("ds"),
            calculate_error: bool = false,
            k: i32 = 0,
            num_projections: i32 = 5,
            num_tables: i32 = 5,
        }
    }

    /// Outputs of [`approx_kfn`].
    output ApproxKfnOutput {
        distances: matrix,
        neighbors: umatrix,
        output_model: model(ApproxKfnModel),
    }
}
