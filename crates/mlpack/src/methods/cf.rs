use crate::model::*;

binding! {
    /// Collaborative filtering over a `(user, item, rating)` coordinate list.
    ///
    /// `training` has one rating per row. The default decomposition is NMF;
    /// `recommendations` items are generated for each user in `query`, or for
    /// every user with `all_user_recommendations`.
    fn cf => "cf";

    /// Optional parameters of [`cf`].
    options CfOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m CfModel),
            query: umatrix,
            test: matrix,
            training: matrix,
        }
        params {
            /// Decomposition: `NMF`, `BatchSVD`, `SVDIncompleteIncremental`, `SVDCompleteIncremental`, `RegSVD`, `RandSVD`, `BiasSVD` or `SVDPP`.
            algorithm: String = String::from("NMF"),
            all_user_recommendations: bool = false,
            interpolation: String = String::from("average"),
            iteration_only_termination: bool = false,
            max_iterations: i32 = 1000,
            min_residue: f64 = 1e-05,
            neighbor_search: String = String::from("euclidean"),
            neighborhood: i32 = 5,
            normalization: String = String::from("none"),
            rank: i32 = 0,
            recommendations: i32 = 5,
            /// Zero seeds from the current time.
            seed: i32 = 0,
        }
    }

    /// Outputs of [`cf`].
    output CfOutput {
        output: umatrix,
        output_model: model(CfModel),
    }
}
