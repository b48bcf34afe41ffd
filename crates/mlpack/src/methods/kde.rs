use crate::model::*;

binding! {
    /// Kernel density estimation.
    fn kde => "kde";

    /// Optional parameters of [`kde`].
    options KdeOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m KdeModel),
            query: matrix,
            reference: matrix,
        }
        params {
            abs_error: f64 = 0.0,
            algorithm: String = String::from("dual-tree"),
            bandwidth: f64 = 1.0,
            initial_sample_size: i32 = 100,
            /// `gaussian`, `epanechnikov`, `laplacian`, `spherical` or `triangular`.
            kernel: String = String::from("gaussian"),
            mc_break_coef: f64 = 0.4,
            mc_entry_coef: f64 = 3.0,
            mc_probability: f64 = 0.95,
            monte_carlo: bool = false,
            rel_error: f64 = 0.05,
            tree: String = String::from("kd-tree"),
        }
    }

    /// Outputs of [`kde`].
    output KdeOutput {
        output_model: model(KdeModel),
        predictions: col,
    }
}
