binding! {
    /// Density-based clustering (DBSCAN).
    fn dbscan => "dbscan";

    /// Optional parameters of [`dbscan`].
    options DbscanOptions {
        required {
            input: matrix,
        }
        inputs {}
        params {
            /// Neighborhood radius.
            epsilon: f64 = 1.0,
            /// Minimum points in a cluster.
            min_size: i32 = 5,
            naive: bool = false,
            selection_type: String = String::from("ordered"),
            single_mode: bool = false,
            tree_type: String = String::from("kd"),
        }
    }

    /// Outputs of [`dbscan`].
    output DbscanOutput {
        /// Cluster of each point. Noise points are labelled `usize::MAX` natively.
        assignments: urow,
        centroids: matrix,
    }
}
