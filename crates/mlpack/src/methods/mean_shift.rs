binding! {
    /// Mean shift clustering.
    fn mean_shift => "mean_shift";

    /// Optional parameters of [`mean_shift`].
    options MeanShiftOptions {
        required {
            input: matrix,
        }
        inputs {}
        params {
            force_convergence: bool = false,
            in_place: bool = false,
            labels_only: bool = false,
            max_iterations: i32 = 1000,
            radius: f64 = 0.0,
        }
    }

    /// Outputs of [`mean_shift`].
    output MeanShiftOutput {
        centroid: matrix,
        output: matrix,
    }
}
