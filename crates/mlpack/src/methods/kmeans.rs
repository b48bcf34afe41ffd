binding! {
    /// k-means clustering.
    ///
    /// `output` is the input with an extra last column holding each point's
    /// cluster; with `labels_only` it is a single row of assignments.
    fn kmeans => "kmeans";

    /// Optional parameters of [`kmeans`].
    options KmeansOptions {
        required {
            clusters: int,
            input: matrix,
        }
        inputs {
            /// Starting centroids, one per row.
            initial_centroids: matrix,
        }
        params {
            algorithm: String = String::from("naive"),
            allow_empty_clusters: bool = false,
            in_place: bool = false,
            kill_empty_clusters: bool = false,
            kmeans_plus_plus: bool = false,
            labels_only: bool = false,
            /// Zero means no limit.
            max_iterations: i32 = 1000,
            percentage: f64 = 0.02,
            refined_start: bool = false,
            samplings: i32 = 100,
            /// Zero seeds from the current time.
            seed: i32 = 0,
        }
    }

    /// Outputs of [`kmeans`].
    output KmeansOutput {
        /// Final centroids, one per row.
        centroid: matrix,
        output: matrix,
    }
}
