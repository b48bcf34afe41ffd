binding! {
    /// Independent component analysis with RADICAL.
    fn radical => "radical";

    /// Optional parameters of [`radical`].
    options RadicalOptions {
        required {
            input: matrix,
        }
        inputs {}
        params {
            angles: i32 = 150,
            noise_std_dev: f64 = 0.175,
            objective: bool = false,
            replicates: i32 = 30,
            seed: i32 = 0,
            sweeps: i32 = 0,
        }
    }

    /// Outputs of [`radical`].
    output RadicalOutput {
        output_ic: matrix,
        output_unmixing: matrix,
    }
}
