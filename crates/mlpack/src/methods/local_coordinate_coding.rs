use crate::model::*;

binding! {
    /// Local coordinate coding: learn a dictionary and encode points against it.
    fn local_coordinate_coding => "local_coordinate_coding";

    /// Optional parameters of [`local_coordinate_coding`].
    options LocalCoordinateCodingOptions<'m> {
        required {}
        inputs {
            initial_dictionary: matrix,
            input_model: model(&'m LocalCoordinateCodingModel),
            test: matrix,
            training: matrix,
        }
        params {
            atoms: i32 = 0,
            lambda: f64 = 0.0,
            max_iterations: i32 = 0,
            normalize: bool = false,
            seed: i32 = 0,
            tolerance: f64 = 0.01,
        }
    }

    /// Outputs of [`local_coordinate_coding`].
    output LocalCoordinateCodingOutput {
        codes: matrix,
        dictionary: matrix,
        output_model: model(LocalCoordinateCodingModel),
    }
}
