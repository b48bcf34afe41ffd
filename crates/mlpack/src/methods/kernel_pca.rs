binding! {
    /// Kernel principal components analysis.
    fn kernel_pca => "kernel_pca";

    /// Optional parameters of [`kernel_pca`].
    options KernelPcaOptions {
        required {
            input: matrix,
            kernel: string,
        }
        inputs {}
        params {
            bandwidth: f64 = 1.0,
            center: bool = false,
            degree: f64 = 1.0,
            kernel_scale: f64 = 1.0,
            new_dimensionality: i32 = 0,
            /// Approximate the kernel matrix with the Nystroem method.
            nystroem_method: bool = false,
            offset: f64 = 0.0,
            sampling: String = String::from("kmeans"),
        }
    }

    /// Outputs of [`kernel_pca`].
    output KernelPcaOutput {
        output: matrix,
    }
}
