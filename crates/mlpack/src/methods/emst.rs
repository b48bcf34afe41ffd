binding! {
    /// Euclidean minimum spanning tree using the dual-tree Borůvka algorithm.
    ///
    /// Each output row is an edge: `[lesser index, greater index, distance]`.
    fn emst => "emst";

    /// Optional parameters of [`emst`].
    options EmstOptions {
        required {
            input: matrix,
        }
        inputs {}
        params {
            leaf_size: i32 = 1,
            naive: bool = false,
        }
    }

    /// Outputs of [`emst`].
    output EmstOutput {
        output: matrix,
    }
}
