binding! {
    /// Large margin nearest neighbor metric learning.
    ///
    /// `output` is the learned distance transformation.
    fn lmnn => "lmnn";

    /// Optional parameters of [`lmnn`].
    options LmnnOptions {
        required {
            input: matrix,
        }
        inputs {
            distance: matrix,
            labels: urow,
        }
        params {
            batch_size: i32 = 50,
            center: bool = false,
            k: i32 = 1,
            linear_scan: bool = false,
            max_iterations: i32 = 100000,
            normalize: bool = false,
            /// `amsgrad`, `bbsgd`, `sgd` or `lbfgs`.
            optimizer: String = String::from("amsgrad"),
            passes: i32 = 50,
            print_accuracy: bool = false,
            range: i32 = 1,
            rank: i32 = 0,
            regularization: f64 = 0.5,
            seed: i32 = 0,
            step_size: f64 = 0.01,
            tolerance: f64 = 1e-07,
        }
    }

    /// Outputs of [`lmnn`].
    output LmnnOutput {
        centered_data: matrix,
        output: matrix,
        transformed_data: matrix,
    }
}
