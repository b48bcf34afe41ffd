//! [`Bridge`] over `libmlpack_capi`.

use std::ffi::{CStr, CString};
use std::sync::atomic::{AtomicBool, Ordering};

use libc::{c_char, c_int, c_void};
use mlpack_sys as sys;

use super::{Bridge, BridgeFault, BridgeResult, RawModel, RawParams, RawTimers, VerbosityScope};
use crate::matrix::{NativeMatrix, NativeMatrixWithInfo};
use crate::model::ModelKind;

type Entry = unsafe extern "C" fn(*mut c_void, *mut c_void) -> c_int;

struct ModelFns {
    get: unsafe extern "C" fn(*mut c_void, *const c_char) -> *mut c_void,
    set: unsafe extern "C" fn(*mut c_void, *const c_char, *mut c_void),
    delete: unsafe extern "C" fn(*mut c_void),
}

macro_rules! model_fns {
    ($get:ident, $set:ident, $delete:ident) => {
        ModelFns {
            get: sys::$get,
            set: sys::$set,
            delete: sys::$delete,
        }
    };
}

fn model_fns(kind: ModelKind) -> ModelFns {
    match kind {
        ModelKind::AdaBoost => model_fns!(mlpackGetAdaBoostModelPtr, mlpackSetAdaBoostModelPtr, mlpackDeleteAdaBoostModelPtr),
        ModelKind::ApproxKfn => model_fns!(mlpackGetApproxKFNModelPtr, mlpackSetApproxKFNModelPtr, mlpackDeleteApproxKFNModelPtr),
        ModelKind::BayesianLinearRegression => model_fns!(mlpackGetBayesianLinearRegressionPtr, mlpackSetBayesianLinearRegressionPtr, mlpackDeleteBayesianLinearRegressionPtr),
        ModelKind::Cf => model_fns!(mlpackGetCFModelPtr, mlpackSetCFModelPtr, mlpackDeleteCFModelPtr),
        ModelKind::DecisionStump => model_fns!(mlpackGetDSModelPtr, mlpackSetDSModelPtr, mlpackDeleteDSModelPtr),
        ModelKind::DecisionTree => model_fns!(mlpackGetDecisionTreeModelPtr, mlpackSetDecisionTreeModelPtr, mlpackDeleteDecisionTreeModelPtr),
        ModelKind::Det => model_fns!(mlpackGetDTreePtr, mlpackSetDTreePtr, mlpackDeleteDTreePtr),
        ModelKind::FastMks => model_fns!(mlpackGetFastMKSModelPtr, mlpackSetFastMKSModelPtr, mlpackDeleteFastMKSModelPtr),
        ModelKind::GaussianKernel => model_fns!(mlpackGetGaussianKernelPtr, mlpackSetGaussianKernelPtr, mlpackDeleteGaussianKernelPtr),
        ModelKind::Gmm => model_fns!(mlpackGetGMMPtr, mlpackSetGMMPtr, mlpackDeleteGMMPtr),
        ModelKind::Hmm => model_fns!(mlpackGetHMMModelPtr, mlpackSetHMMModelPtr, mlpackDeleteHMMModelPtr),
        ModelKind::HoeffdingTree => model_fns!(mlpackGetHoeffdingTreeModelPtr, mlpackSetHoeffdingTreeModelPtr, mlpackDeleteHoeffdingTreeModelPtr),
        ModelKind::Kde => model_fns!(mlpackGetKDEModelPtr, mlpackSetKDEModelPtr, mlpackDeleteKDEModelPtr),
        ModelKind::Kfn => model_fns!(mlpackGetKFNModelPtr, mlpackSetKFNModelPtr, mlpackDeleteKFNModelPtr),
        ModelKind::Knn => model_fns!(mlpackGetKNNModelPtr, mlpackSetKNNModelPtr, mlpackDeleteKNNModelPtr),
        ModelKind::Lars => model_fns!(mlpackGetLARSPtr, mlpackSetLARSPtr, mlpackDeleteLARSPtr),
        ModelKind::LinearRegression => model_fns!(mlpackGetLinearRegressionPtr, mlpackSetLinearRegressionPtr, mlpackDeleteLinearRegressionPtr),
        ModelKind::LinearSvm => model_fns!(mlpackGetLinearSVMModelPtr, mlpackSetLinearSVMModelPtr, mlpackDeleteLinearSVMModelPtr),
        ModelKind::LocalCoordinateCoding => model_fns!(mlpackGetLocalCoordinateCodingPtr, mlpackSetLocalCoordinateCodingPtr, mlpackDeleteLocalCoordinateCodingPtr),
        ModelKind::LogisticRegression => model_fns!(mlpackGetLogisticRegressionPtr, mlpackSetLogisticRegressionPtr, mlpackDeleteLogisticRegressionPtr),
        ModelKind::Lsh => model_fns!(mlpackGetLSHSearchPtr, mlpackSetLSHSearchPtr, mlpackDeleteLSHSearchPtr),
        ModelKind::Nbc => model_fns!(mlpackGetNBCModelPtr, mlpackSetNBCModelPtr, mlpackDeleteNBCModelPtr),
        ModelKind::Perceptron => model_fns!(mlpackGetPerceptronModelPtr, mlpackSetPerceptronModelPtr, mlpackDeletePerceptronModelPtr),
        ModelKind::Rann => model_fns!(mlpackGetRAModelPtr, mlpackSetRAModelPtr, mlpackDeleteRAModelPtr),
        ModelKind::RandomForest => model_fns!(mlpackGetRandomForestModelPtr, mlpackSetRandomForestModelPtr, mlpackDeleteRandomForestModelPtr),
        ModelKind::RangeSearch => model_fns!(mlpackGetRSModelPtr, mlpackSetRSModelPtr, mlpackDeleteRSModelPtr),
        ModelKind::Scaling => model_fns!(mlpackGetScalingModelPtr, mlpackSetScalingModelPtr, mlpackDeleteScalingModelPtr),
        ModelKind::SoftmaxRegression => model_fns!(mlpackGetSoftmaxRegressionPtr, mlpackSetSoftmaxRegressionPtr, mlpackDeleteSoftmaxRegressionPtr),
        ModelKind::SparseCoding => model_fns!(mlpackGetSparseCodingPtr, mlpackSetSparseCodingPtr, mlpackDeleteSparseCodingPtr),
    }
}

fn entry(program: &str) -> Option<Entry> {
    let entry: Entry = match program {
        "adaboost" => sys::mlpackAdaboost,
        "approx_kfn" => sys::mlpackApproxKfn,
        "bayesian_linear_regression" => sys::mlpackBayesianLinearRegression,
        "cf" => sys::mlpackCf,
        "dbscan" => sys::mlpackDbscan,
        "decision_stump" => sys::mlpackDecisionStump,
        "decision_tree" => sys::mlpackDecisionTree,
        "det" => sys::mlpackDet,
        "emst" => sys::mlpackEmst,
        "fastmks" => sys::mlpackFastmks,
        "gmm_generate" => sys::mlpackGmmGenerate,
        "gmm_probability" => sys::mlpackGmmProbability,
        "gmm_train" => sys::mlpackGmmTrain,
        "hmm_generate" => sys::mlpackHmmGenerate,
        "hmm_loglik" => sys::mlpackHmmLoglik,
        "hmm_train" => sys::mlpackHmmTrain,
        "hmm_viterbi" => sys::mlpackHmmViterbi,
        "hoeffding_tree" => sys::mlpackHoeffdingTree,
        "image_converter" => sys::mlpackImageConverter,
        "kde" => sys::mlpackKde,
        "kernel_pca" => sys::mlpackKernelPca,
        "kfn" => sys::mlpackKfn,
        "kmeans" => sys::mlpackKmeans,
        "knn" => sys::mlpackKnn,
        "krann" => sys::mlpackKrann,
        "lars" => sys::mlpackLars,
        "linear_regression" => sys::mlpackLinearRegression,
        "linear_svm" => sys::mlpackLinearSvm,
        "lmnn" => sys::mlpackLmnn,
        "local_coordinate_coding" => sys::mlpackLocalCoordinateCoding,
        "logistic_regression" => sys::mlpackLogisticRegression,
        "lsh" => sys::mlpackLsh,
        "mean_shift" => sys::mlpackMeanShift,
        "nbc" => sys::mlpackNbc,
        "nca" => sys::mlpackNca,
        "nmf" => sys::mlpackNmf,
        "pca" => sys::mlpackPca,
        "perceptron" => sys::mlpackPerceptron,
        "preprocess_binarize" => sys::mlpackPreprocessBinarize,
        "preprocess_describe" => sys::mlpackPreprocessDescribe,
        "preprocess_one_hot_encoding" => sys::mlpackPreprocessOneHotEncoding,
        "preprocess_scale" => sys::mlpackPreprocessScale,
        "preprocess_split" => sys::mlpackPreprocessSplit,
        "radical" => sys::mlpackRadical,
        "random_forest" => sys::mlpackRandomForest,
        "range_search" => sys::mlpackRangeSearch,
        "softmax_regression" => sys::mlpackSoftmaxRegression,
        "sparse_coding" => sys::mlpackSparseCoding,
        "test_binding" => sys::mlpackTestBinding,
        _ => return None,
    };
    Some(entry)
}

fn c_name(name: &str) -> BridgeResult<CString> {
    CString::new(name).map_err(|_| BridgeFault::Native(format!("{name:?} contains a NUL byte")))
}

/// Copy a native string; null reads as empty.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn owned_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Copy `len` elements from native storage; null or zero reads as empty.
///
/// # Safety
/// `ptr` must be null or valid for `len` reads.
unsafe fn owned_slice<T: Copy>(ptr: *const T, len: usize) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(ptr, len).to_vec()
}

fn native_matrix<T>(rows: usize, cols: usize, data: Vec<T>) -> BridgeResult<NativeMatrix<T>> {
    if data.is_empty() {
        return Ok(NativeMatrix::empty());
    }
    NativeMatrix::from_col_major(rows, cols, data)
        .ok_or_else(|| BridgeFault::Native(format!("inconsistent {rows}x{cols} matrix")))
}

/// Mirror of the library's process-wide verbosity flag, which has no getter.
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Every `NativeBridge` drives the same native flag.
static VERBOSITY: VerbosityScope = VerbosityScope::new();

/// The linked mlpack bridge library.
///
/// All instances share the library's global state, including the verbosity
/// flag, so they are interchangeable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeBridge;

impl NativeBridge {
    pub fn new() -> Self {
        Self::default()
    }

    fn last_error() -> String {
        // SAFETY: the library returns null or a NUL-terminated string that
        // stays valid until the next call.
        let message = unsafe { owned_string(sys::mlpackGetLastError()) };
        if message.is_empty() {
            "unknown error".to_owned()
        } else {
            message
        }
    }
}

macro_rules! vector_getter {
    ($fn_name:ident, $ty:ty, $len:ident, $ptr:ident) => {
        fn $fn_name(&self, params: RawParams, name: &str) -> BridgeResult<Vec<$ty>> {
            let id = c_name(name)?;
            // SAFETY: `params` is a live environment; the pointer is valid for
            // `len` elements until the environment is cleaned.
            Ok(unsafe {
                let len = sys::$len(params.as_ptr(), id.as_ptr());
                owned_slice(sys::$ptr(params.as_ptr(), id.as_ptr()), len)
            })
        }
    };
}

macro_rules! matrix_getter {
    ($fn_name:ident, $ty:ty, $rows:ident, $cols:ident, $ptr:ident) => {
        fn $fn_name(&self, params: RawParams, name: &str) -> BridgeResult<NativeMatrix<$ty>> {
            let id = c_name(name)?;
            // SAFETY: as for vector getters, with `rows * cols` elements.
            let (rows, cols, data) = unsafe {
                let rows = sys::$rows(params.as_ptr(), id.as_ptr());
                let cols = sys::$cols(params.as_ptr(), id.as_ptr());
                let data = owned_slice(sys::$ptr(params.as_ptr(), id.as_ptr()), rows * cols);
                (rows, cols, data)
            };
            native_matrix(rows, cols, data)
        }
    };
}

impl Bridge for NativeBridge {
    fn name(&self) -> &'static str {
        "native"
    }

    fn new_params(&self, program: &str) -> BridgeResult<RawParams> {
        let id = c_name(program)?;
        // SAFETY: `id` is a valid C string for the duration of the call.
        let ptr = unsafe { sys::mlpackGetParams(id.as_ptr()) };
        RawParams::from_ptr(ptr).ok_or_else(|| BridgeFault::Native(Self::last_error()))
    }

    fn free_params(&self, params: RawParams) {
        // SAFETY: `params` came from `mlpackGetParams` and is freed once.
        unsafe { sys::mlpackCleanParams(params.as_ptr()) }
    }

    fn new_timers(&self) -> BridgeResult<RawTimers> {
        // SAFETY: no preconditions.
        let ptr = unsafe { sys::mlpackGetTimers() };
        RawTimers::from_ptr(ptr).ok_or_else(|| BridgeFault::Native(Self::last_error()))
    }

    fn free_timers(&self, timers: RawTimers) {
        // SAFETY: `timers` came from `mlpackGetTimers` and is freed once.
        unsafe { sys::mlpackCleanTimers(timers.as_ptr()) }
    }

    fn set_bool(&self, params: RawParams, name: &str, value: bool) -> BridgeResult<()> {
        let id = c_name(name)?;
        // SAFETY: live environment, valid C string.
        unsafe { sys::mlpackSetParamBool(params.as_ptr(), id.as_ptr(), value) };
        Ok(())
    }

    fn set_int(&self, params: RawParams, name: &str, value: i32) -> BridgeResult<()> {
        let id = c_name(name)?;
        // SAFETY: live environment, valid C string.
        unsafe { sys::mlpackSetParamInt(params.as_ptr(), id.as_ptr(), value) };
        Ok(())
    }

    fn set_double(&self, params: RawParams, name: &str, value: f64) -> BridgeResult<()> {
        let id = c_name(name)?;
        // SAFETY: live environment, valid C string.
        unsafe { sys::mlpackSetParamDouble(params.as_ptr(), id.as_ptr(), value) };
        Ok(())
    }

    fn set_string(&self, params: RawParams, name: &str, value: &str) -> BridgeResult<()> {
        let id = c_name(name)?;
        let value = c_name(value)?;
        // SAFETY: live environment; the library copies the string.
        unsafe { sys::mlpackSetParamString(params.as_ptr(), id.as_ptr(), value.as_ptr()) };
        Ok(())
    }

    fn set_vec_int(&self, params: RawParams, name: &str, value: &[i32]) -> BridgeResult<()> {
        let id = c_name(name)?;
        // SAFETY: `value` is valid for `len` reads; the library copies it.
        unsafe {
            sys::mlpackSetParamVectorInt(params.as_ptr(), id.as_ptr(), value.as_ptr(), value.len())
        };
        Ok(())
    }

    fn set_vec_string(&self, params: RawParams, name: &str, value: &[String]) -> BridgeResult<()> {
        let id = c_name(name)?;
        let owned = value
            .iter()
            .map(|s| c_name(s))
            .collect::<BridgeResult<Vec<_>>>()?;
        let ptrs: Vec<*const c_char> = owned.iter().map(|s| s.as_ptr()).collect();
        // SAFETY: every pointer in `ptrs` is kept alive by `owned` for the
        // duration of the call; the library copies the strings.
        unsafe {
            sys::mlpackSetParamVectorStr(params.as_ptr(), id.as_ptr(), ptrs.as_ptr(), ptrs.len())
        };
        Ok(())
    }

    fn get_bool(&self, params: RawParams, name: &str) -> BridgeResult<bool> {
        let id = c_name(name)?;
        // SAFETY: live environment, valid C string.
        Ok(unsafe { sys::mlpackGetParamBool(params.as_ptr(), id.as_ptr()) })
    }

    fn get_int(&self, params: RawParams, name: &str) -> BridgeResult<i32> {
        let id = c_name(name)?;
        // SAFETY: live environment, valid C string.
        Ok(unsafe { sys::mlpackGetParamInt(params.as_ptr(), id.as_ptr()) })
    }

    fn get_double(&self, params: RawParams, name: &str) -> BridgeResult<f64> {
        let id = c_name(name)?;
        // SAFETY: live environment, valid C string.
        Ok(unsafe { sys::mlpackGetParamDouble(params.as_ptr(), id.as_ptr()) })
    }

    fn get_string(&self, params: RawParams, name: &str) -> BridgeResult<String> {
        let id = c_name(name)?;
        // SAFETY: the returned string is owned by the environment.
        Ok(unsafe { owned_string(sys::mlpackGetParamString(params.as_ptr(), id.as_ptr())) })
    }

    vector_getter!(get_vec_int, i32, mlpackGetVecIntSize, mlpackGetVecIntPtr);

    fn get_vec_string(&self, params: RawParams, name: &str) -> BridgeResult<Vec<String>> {
        let id = c_name(name)?;
        // SAFETY: indices below the reported size are valid.
        Ok(unsafe {
            let len = sys::mlpackGetVecStringSize(params.as_ptr(), id.as_ptr());
            (0..len)
                .map(|i| owned_string(sys::mlpackGetVecStringElement(params.as_ptr(), id.as_ptr(), i)))
                .collect()
        })
    }

    fn set_mat(&self, params: RawParams, name: &str, value: &NativeMatrix<f64>) -> BridgeResult<()> {
        let id = c_name(name)?;
        // SAFETY: the buffer holds `rows * cols` elements; the library copies it.
        unsafe {
            sys::mlpackToArmaMat(
                params.as_ptr(),
                id.as_ptr(),
                value.as_slice().as_ptr(),
                value.rows(),
                value.cols(),
            )
        };
        Ok(())
    }

    fn set_umat(&self, params: RawParams, name: &str, value: &NativeMatrix<usize>) -> BridgeResult<()> {
        let id = c_name(name)?;
        // SAFETY: as for `set_mat`.
        unsafe {
            sys::mlpackToArmaUmat(
                params.as_ptr(),
                id.as_ptr(),
                value.as_slice().as_ptr(),
                value.rows(),
                value.cols(),
            )
        };
        Ok(())
    }

    fn set_row(&self, params: RawParams, name: &str, value: &[f64]) -> BridgeResult<()> {
        let id = c_name(name)?;
        // SAFETY: `value` is valid for `len` reads; the library copies it.
        unsafe { sys::mlpackToArmaRow(params.as_ptr(), id.as_ptr(), value.as_ptr(), value.len()) };
        Ok(())
    }

    fn set_col(&self, params: RawParams, name: &str, value: &[f64]) -> BridgeResult<()> {
        let id = c_name(name)?;
        // SAFETY: as for `set_row`.
        unsafe { sys::mlpackToArmaCol(params.as_ptr(), id.as_ptr(), value.as_ptr(), value.len()) };
        Ok(())
    }

    fn set_urow(&self, params: RawParams, name: &str, value: &[usize]) -> BridgeResult<()> {
        let id = c_name(name)?;
        // SAFETY: as for `set_row`.
        unsafe { sys::mlpackToArmaUrow(params.as_ptr(), id.as_ptr(), value.as_ptr(), value.len()) };
        Ok(())
    }

    fn set_ucol(&self, params: RawParams, name: &str, value: &[usize]) -> BridgeResult<()> {
        let id = c_name(name)?;
        // SAFETY: as for `set_row`.
        unsafe { sys::mlpackToArmaUcol(params.as_ptr(), id.as_ptr(), value.as_ptr(), value.len()) };
        Ok(())
    }

    fn set_mat_with_info(
        &self,
        params: RawParams,
        name: &str,
        value: &NativeMatrixWithInfo,
    ) -> BridgeResult<()> {
        if value.info.len() != value.matrix.rows() {
            return Err(BridgeFault::Native(format!(
                "'{name}' has {} categorical flags for {} dimensions",
                value.info.len(),
                value.matrix.rows()
            )));
        }
        let id = c_name(name)?;
        // SAFETY: `info` holds one flag per native row and the data buffer
        // `rows * cols` elements; the library copies both.
        unsafe {
            sys::mlpackToArmaMatWithInfo(
                params.as_ptr(),
                id.as_ptr(),
                value.info.as_ptr(),
                value.matrix.as_slice().as_ptr(),
                value.matrix.rows(),
                value.matrix.cols(),
            )
        };
        Ok(())
    }

    matrix_getter!(get_mat, f64, mlpackNumRowMat, mlpackNumColMat, mlpackArmaPtrMat);
    matrix_getter!(get_umat, usize, mlpackNumRowUmat, mlpackNumColUmat, mlpackArmaPtrUmat);
    vector_getter!(get_row, f64, mlpackNumElemRow, mlpackArmaPtrRow);
    vector_getter!(get_col, f64, mlpackNumElemCol, mlpackArmaPtrCol);
    vector_getter!(get_urow, usize, mlpackNumElemUrow, mlpackArmaPtrUrow);
    vector_getter!(get_ucol, usize, mlpackNumElemUcol, mlpackArmaPtrUcol);

    fn get_mat_with_info(&self, params: RawParams, name: &str) -> BridgeResult<NativeMatrixWithInfo> {
        let id = c_name(name)?;
        // SAFETY: data holds `rows * cols` elements and info `rows` flags.
        let (rows, cols, data, info) = unsafe {
            let p = params.as_ptr();
            let rows = sys::mlpackNumRowMatWithInfo(p, id.as_ptr());
            let cols = sys::mlpackNumColMatWithInfo(p, id.as_ptr());
            let data = owned_slice(sys::mlpackArmaPtrMatWithInfo(p, id.as_ptr()), rows * cols);
            let info = owned_slice(sys::mlpackArmaInfoPtrMatWithInfo(p, id.as_ptr()), rows);
            (rows, cols, data, info)
        };
        Ok(NativeMatrixWithInfo {
            info,
            matrix: native_matrix(rows, cols, data)?,
        })
    }

    fn set_passed(&self, params: RawParams, name: &str) -> BridgeResult<()> {
        let id = c_name(name)?;
        // SAFETY: live environment, valid C string.
        unsafe { sys::mlpackSetPassed(params.as_ptr(), id.as_ptr()) };
        Ok(())
    }

    fn get_model(
        &self,
        params: RawParams,
        kind: ModelKind,
        name: &str,
    ) -> BridgeResult<Option<RawModel>> {
        let id = c_name(name)?;
        // SAFETY: live environment; ownership of the result moves to us.
        let ptr = unsafe { (model_fns(kind).get)(params.as_ptr(), id.as_ptr()) };
        Ok(RawModel::from_ptr(ptr))
    }

    fn set_model(
        &self,
        params: RawParams,
        kind: ModelKind,
        name: &str,
        model: RawModel,
    ) -> BridgeResult<()> {
        let id = c_name(name)?;
        // SAFETY: `model` is a live object of `kind`; the environment only
        // borrows it.
        unsafe { (model_fns(kind).set)(params.as_ptr(), id.as_ptr(), model.as_ptr()) };
        Ok(())
    }

    fn free_model(&self, kind: ModelKind, model: RawModel) -> BridgeResult<()> {
        // SAFETY: `model` was taken with the getter for `kind` and is freed
        // once by its handle.
        unsafe { (model_fns(kind).delete)(model.as_ptr()) };
        Ok(())
    }

    fn disable_backtrace(&self) {
        // SAFETY: no preconditions.
        unsafe { sys::mlpackDisableBacktrace() }
    }

    fn enable_verbose(&self) {
        // SAFETY: no preconditions.
        unsafe { sys::mlpackEnableVerbose() }
        VERBOSE.store(true, Ordering::SeqCst);
    }

    fn disable_verbose(&self) {
        // SAFETY: no preconditions.
        unsafe { sys::mlpackDisableVerbose() }
        VERBOSE.store(false, Ordering::SeqCst);
    }

    fn verbose(&self) -> bool {
        VERBOSE.load(Ordering::SeqCst)
    }

    fn verbosity(&self) -> &VerbosityScope {
        &VERBOSITY
    }

    fn invoke(&self, program: &str, params: RawParams, timers: RawTimers) -> BridgeResult<()> {
        let entry = entry(program)
            .ok_or_else(|| BridgeFault::Native(format!("no native entry for '{program}'")))?;
        // SAFETY: both sets are live and were created for this program.
        let status = unsafe { entry(params.as_ptr(), timers.as_ptr()) };
        if status == 0 {
            Ok(())
        } else {
            Err(BridgeFault::Native(Self::last_error()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_accessors() {
        for &kind in ModelKind::ALL {
            let _ = model_fns(kind);
        }
    }

    #[test]
    fn entries_cover_builtin_program_ids() {
        for program in ["pca", "kmeans", "perceptron", "test_binding", "preprocess_binarize"] {
            assert!(entry(program).is_some(), "{program}");
        }
        assert!(entry("nope").is_none());
    }

    #[test]
    fn instances_share_one_verbosity_scope() {
        let (a, b) = (NativeBridge::new(), NativeBridge::new());
        assert!(std::ptr::eq(a.verbosity(), b.verbosity()));
    }
}
