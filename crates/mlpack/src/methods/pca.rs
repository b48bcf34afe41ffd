binding! {
    /// Principal components analysis.
    ///
    /// Projects `input` onto its leading principal components. A
    /// `new_dimensionality` of zero keeps every dimension.
    fn pca => "pca";

    /// Optional parameters of [`pca`].
    options PcaOptions {
        required {
            input: matrix,
        }
        inputs {}
        params {
            /// `exact`, `randomized`, `randomized-block-krylov` or `quic`.
            decomposition_method: String = String::from("exact"),
            new_dimensionality: i32 = 0,
            scale: bool = false,
            /// Keep enough dimensions to retain this fraction of variance; overrides `new_dimensionality`.
            var_to_retain: f64 = 0.0,
        }
    }

    /// Outputs of [`pca`].
    output PcaOutput {
        output: matrix,
    }
}
