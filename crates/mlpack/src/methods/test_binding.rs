use crate::model::*;

binding! {
    /// Self-test program of the binding layer.
    ///
    /// Echoes its inputs through every slot kind: scalars come back
    /// incremented (strings with `2` appended), matrices doubled. Fails when
    /// `flag2` is set.
    fn test_binding => "test_binding";

    /// Optional parameters of [`test_binding`].
    options TestBindingOptions<'m> {
        required {
            double_in: double,
            int_in: int,
            string_in: string,
        }
        inputs {
            col_in: col,
            matrix_and_info_in: matrix_with_info,
            matrix_in: matrix,
            model_in: model(&'m GaussianKernelModel),
            row_in: row,
            ucol_in: ucol,
            umatrix_in: umatrix,
            urow_in: urow,
        }
        params {
            /// Produce `model_out` without `model_in`.
            build_model: bool = false,
            flag1: bool = false,
            /// Makes the program fail.
            flag2: bool = false,
            str_vector_in: Vec<String> = Vec::new(),
            vector_in: Vec<i32> = Vec::new(),
        }
    }

    /// Outputs of [`test_binding`].
    output TestBindingOutput {
        col_out: col,
        double_out: double,
        int_out: int,
        matrix_and_info_out: matrix,
        matrix_out: matrix,
        /// Bandwidth of `model_in`.
        model_bw_out: double,
        model_out: model(GaussianKernelModel),
        row_out: row,
        str_vector_out: vec_string,
        string_out: string,
        ucol_out: ucol,
        umatrix_out: umatrix,
        urow_out: urow,
        vector_out: vec_int,
    }
}
