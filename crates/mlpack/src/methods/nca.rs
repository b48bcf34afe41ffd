binding! {
    /// Neighborhood components analysis.
    fn nca => "nca";

    /// Optional parameters of [`nca`].
    options NcaOptions {
        required {
            input: matrix,
        }
        inputs {
            labels: urow,
        }
        params {
            armijo_constant: f64 = 0.0001,
            batch_size: i32 = 50,
            linear_scan: bool = false,
            max_iterations: i32 = 500000,
            max_line_search_trials: i32 = 50,
            max_step: f64 = 1e+20,
            min_step: f64 = 1e-20,
            normalize: bool = false,
            num_basis: i32 = 5,
            optimizer: String = String::from("sgd"),
            seed: i32 = 0,
            step_size: f64 = 0.01,
            tolerance: f64 = 1e-07,
            wolfe: f64 = 0.9,
        }
    }

    /// Outputs of [`nca`].
    output NcaOutput {
        output: matrix,
    }
}
