use crate::model::*;

binding! {
    /// Find all reference points within a distance range of each query point.
    ///
    /// Results are written to `neighbors_file` and `distances_file`; both
    /// outputs echo the file names back.
    fn range_search => "range_search";

    /// Optional parameters of [`range_search`].
    options RangeSearchOptions<'m> {
        required {}
        inputs {
            input_model: model(&'m RangeSearchModel),
            query: matrix,
            reference: matrix,
        }
        params {
            leaf_size: i32 = 20,
            max: f64 = 0.0,
            min: f64 = 0.0,
            naive: bool = false,
            random_basis: bool = false,
            seed: i32 = 0,
            single_mode: bool = false,
            tree_type: String = String::from("kd"),
        }
    }

    /// Outputs of [`range_search`].
    output RangeSearchOutput {
        distances_file: string,
        neighbors_file: string,
        output_model: model(RangeSearchModel),
    }
}
