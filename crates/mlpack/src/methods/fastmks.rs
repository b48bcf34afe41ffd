use crate::model::*;

binding! {
    /// Fast max-kernel search.
    fn fastmks => "fastmks";

    /// Optional parameters of [`fastmks`].
    options FastmksOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m FastMksModel),
            query: matrix,
            reference: matrix,
        }
        params {
            bandwidth: f64 = 1.0,
            base: f64 = 2.0,
            degree: f64 = 2.0,
            k: i32 = 0,
            kernel: String = String::from("linear"),
            naive: bool = false,
            offset: f64 = 0.0,
            scale: f64 = 1.0,
            single: bool = false,
        }
    }

    /// Outputs of [`fastmks`].
    output FastmksOutput {
        indices: umatrix,
        kernels: matrix,
        output_model: model(FastMksModel),
    }
}
