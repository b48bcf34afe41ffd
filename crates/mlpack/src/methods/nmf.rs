binding! {
    /// Non-negative matrix factorization `V ~ W H` of rank `rank`.
    fn nmf => "nmf";

    /// Optional parameters of [`nmf`].
    options NmfOptions {
        required {
            input: matrix,
            rank: int,
        }
        inputs {
            initial_h: matrix,
            initial_w: matrix,
        }
        params {
            max_iterations: i32 = 10000,
            min_residue: f64 = 1e-05,
            seed: i32 = 0,
            /// `multdist`, `multdiv` or `als`.
            update_rules: String = String::from("multdist"),
        }
    }

    /// Outputs of [`nmf`].
    output NmfOutput {
        h: matrix,
        w: matrix,
    }
}
