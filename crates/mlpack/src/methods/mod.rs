//! One entry per mlpack program.
//!
//! Each module defines `<program>` together with its `<Program>Options`
//! record and `<Program>Output` record. Required inputs are positional;
//! everything else lives in the options record, whose `Default` carries the
//! documented defaults. Only options that differ from their default are
//! forwarded to the program.

mod adaboost;
mod approx_kfn;
mod bayesian_linear_regression;
mod cf;
mod dbscan;
mod decision_stump;
mod decision_tree;
mod det;
mod emst;
mod fastmks;
mod gmm_generate;
mod gmm_probability;
mod gmm_train;
mod hmm_generate;
mod hmm_loglik;
mod hmm_train;
mod hmm_viterbi;
mod hoeffding_tree;
mod image_converter;
mod kde;
mod kernel_pca;
mod kfn;
mod kmeans;
mod knn;
mod krann;
mod lars;
mod linear_regression;
mod linear_svm;
mod lmnn;
mod local_coordinate_coding;
mod logistic_regression;
mod lsh;
mod mean_shift;
mod nbc;
mod nca;
mod nmf;
mod pca;
mod perceptron;
mod preprocess_binarize;
mod preprocess_describe;
mod preprocess_one_hot_encoding;
mod preprocess_scale;
mod preprocess_split;
mod radical;
mod random_forest;
mod range_search;
mod softmax_regression;
mod sparse_coding;
mod test_binding;

pub use adaboost::*;
pub use approx_kfn::*;
pub use bayesian_linear_regression::*;
pub use cf::*;
pub use dbscan::*;
pub use decision_stump::*;
pub use decision_tree::*;
pub use det::*;
pub use emst::*;
pub use fastmks::*;
pub use gmm_generate::*;
pub use gmm_probability::*;
pub use gmm_train::*;
pub use hmm_generate::*;
pub use hmm_loglik::*;
pub use hmm_train::*;
pub use hmm_viterbi::*;
pub use hoeffding_tree::*;
pub use image_converter::*;
pub use kde::*;
pub use kernel_pca::*;
pub use kfn::*;
pub use kmeans::*;
pub use knn::*;
pub use krann::*;
pub use lars::*;
pub use linear_regression::*;
pub use linear_svm::*;
pub use lmnn::*;
pub use local_coordinate_coding::*;
pub use logistic_regression::*;
pub use lsh::*;
pub use mean_shift::*;
pub use nbc::*;
pub use nca::*;
pub use nmf::*;
pub use pca::*;
pub use perceptron::*;
pub use preprocess_binarize::*;
pub use preprocess_describe::*;
pub use preprocess_one_hot_encoding::*;
pub use preprocess_scale::*;
pub use preprocess_split::*;
pub use radical::*;
pub use random_forest::*;
pub use range_search::*;
pub use softmax_regression::*;
pub use sparse_coding::*;
pub use test_binding::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelKind;
    use crate::testing::reference_runtime;
    use ndarray::array;

    #[test]
    fn renamed_parameter_uses_native_name() {
        let (runtime, bridge) = reference_runtime();
        bridge.register_program("hmm_train", |ctx| match ctx.string("type", String::new())?.as_str() {
            "discrete" => Ok(()),
            other => Err(format!("unexpected type {other:?}")),
        });

        let options = HmmTrainOptions::builder()
            .hmm_type("discrete".to_owned())
            .build();
        let out = hmm_train(&runtime, "sequences.txt", &options).unwrap();
        assert!(out.output_model.is_none());

        let passed = bridge.last_invocation().unwrap().passed;
        assert!(passed.contains("type"));
        assert!(passed.contains("input_file"));
        assert!(!passed.contains("hmm_type"));
    }

    #[test]
    fn required_model_is_lent_to_the_program() {
        let (runtime, bridge) = reference_runtime();
        bridge.register_program("gmm_train", |ctx| {
            let gaussians = ctx.int("gaussians", 0)?;
            ctx.set_model("output_model", ModelKind::Gmm, gaussians)
        });
        bridge.register_program("gmm_generate", |ctx| {
            let gaussians = *ctx
                .model::<i32>("input_model", ModelKind::Gmm)?
                .ok_or("input_model must be specified")?;
            let samples = ctx.int("samples", 0)?;
            let data = (0..samples).map(|i| f64::from(i * gaussians)).collect();
            ctx.set_matrix("output", crate::NativeMatrix::row(data))
        });

        let x = array![[0.0, 1.0], [1.0, 0.0]];
        let gmm = gmm_train(&runtime, 3, &x, &GmmTrainOptions::new())
            .unwrap()
            .output_model
            .unwrap();
        let out = gmm_generate(&runtime, &gmm, 4, &GmmGenerateOptions::new()).unwrap();
        assert_eq!(out.output.unwrap(), array![[0.0], [3.0], [6.0], [9.0]]);
        assert_eq!(bridge.outstanding_models(), 1);
        drop(gmm);
        assert_eq!(bridge.outstanding_models(), 0);
    }

    #[test]
    fn deprecated_outputs_are_returned_alongside() {
        let (runtime, bridge) = reference_runtime();
        bridge.register_program("logistic_regression", |ctx| {
            ctx.set_urow("predictions", vec![1, 0])?;
            ctx.set_urow("output", vec![1, 0])
        });
        let options = LogisticRegressionOptions::builder()
            .test(array![[1.0], [0.0]])
            .build();
        let out = logistic_regression(&runtime, &options).unwrap();
        assert_eq!(out.output, out.predictions);
        assert!(out.probabilities.is_none());
        assert!(out.output_model.is_none());
    }
}
