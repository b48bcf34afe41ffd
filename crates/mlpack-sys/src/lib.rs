//! Raw declarations for `libmlpack_capi`, the flat C bridge over mlpack's
//! parameter and program registry.
//!
//! Every program shares one calling convention: obtain a parameter
//! environment for the program with [`mlpackGetParams`] and a timer set with
//! [`mlpackGetTimers`], fill named slots, mark the slots that were supplied or
//! are requested with [`mlpackSetPassed`], call the program entry and read
//! outputs back by name. Program entries return `0` on success; on failure the
//! message is available from [`mlpackGetLastError`] until the next call.
//!
//! Matrices are column-major. Matrix getters return a pointer into storage
//! owned by the environment, valid until the environment is cleaned.
//!
//! Model getters transfer ownership of the returned object to the caller,
//! which must eventually pass it to the matching `mlpackDelete*Ptr`. Model
//! setters lend the object; the environment never frees it.

#![allow(non_snake_case)]
#![no_std]

use libc::{c_char, c_double, c_int, c_void, size_t};

// =============================================================================
// Environment
// =============================================================================

#[link(name = "mlpack_capi")]
extern "C" {
    pub fn mlpackGetParams(program: *const c_char) -> *mut c_void;
    pub fn mlpackGetTimers() -> *mut c_void;
    pub fn mlpackCleanParams(params: *mut c_void);
    pub fn mlpackCleanTimers(timers: *mut c_void);

    pub fn mlpackSetPassed(params: *mut c_void, id: *const c_char);

    pub fn mlpackEnableVerbose();
    pub fn mlpackDisableVerbose();
    pub fn mlpackDisableBacktrace();
    pub fn mlpackGetLastError() -> *const c_char;
}

// =============================================================================
// Scalars
// =============================================================================

#[link(name = "mlpack_capi")]
extern "C" {
    pub fn mlpackSetParamBool(params: *mut c_void, id: *const c_char, value: bool);
    pub fn mlpackSetParamInt(params: *mut c_void, id: *const c_char, value: c_int);
    pub fn mlpackSetParamDouble(params: *mut c_void, id: *const c_char, value: c_double);
    pub fn mlpackSetParamString(params: *mut c_void, id: *const c_char, value: *const c_char);
    pub fn mlpackSetParamVectorInt(
        params: *mut c_void,
        id: *const c_char,
        values: *const c_int,
        len: size_t,
    );
    pub fn mlpackSetParamVectorStr(
        params: *mut c_void,
        id: *const c_char,
        values: *const *const c_char,
        len: size_t,
    );

    pub fn mlpackGetParamBool(params: *mut c_void, id: *const c_char) -> bool;
    pub fn mlpackGetParamInt(params: *mut c_void, id: *const c_char) -> c_int;
    pub fn mlpackGetParamDouble(params: *mut c_void, id: *const c_char) -> c_double;
    pub fn mlpackGetParamString(params: *mut c_void, id: *const c_char) -> *const c_char;
    pub fn mlpackGetVecIntSize(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackGetVecIntPtr(params: *mut c_void, id: *const c_char) -> *const c_int;
    pub fn mlpackGetVecStringSize(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackGetVecStringElement(
        params: *mut c_void,
        id: *const c_char,
        index: size_t,
    ) -> *const c_char;
}

// =============================================================================
// Matrices
// =============================================================================

#[link(name = "mlpack_capi")]
extern "C" {
    pub fn mlpackToArmaMat(
        params: *mut c_void,
        id: *const c_char,
        data: *const c_double,
        rows: size_t,
        cols: size_t,
    );
    pub fn mlpackToArmaUmat(
        params: *mut c_void,
        id: *const c_char,
        data: *const size_t,
        rows: size_t,
        cols: size_t,
    );
    pub fn mlpackToArmaRow(params: *mut c_void, id: *const c_char, data: *const c_double, len: size_t);
    pub fn mlpackToArmaCol(params: *mut c_void, id: *const c_char, data: *const c_double, len: size_t);
    pub fn mlpackToArmaUrow(params: *mut c_void, id: *const c_char, data: *const size_t, len: size_t);
    pub fn mlpackToArmaUcol(params: *mut c_void, id: *const c_char, data: *const size_t, len: size_t);
    pub fn mlpackToArmaMatWithInfo(
        params: *mut c_void,
        id: *const c_char,
        categorical: *const bool,
        data: *const c_double,
        rows: size_t,
        cols: size_t,
    );


    pub fn mlpackNumRowMat(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumColMat(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumElemMat(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackArmaPtrMat(params: *mut c_void, id: *const c_char) -> *const c_double;

    pub fn mlpackNumRowUmat(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumColUmat(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumElemUmat(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackArmaPtrUmat(params: *mut c_void, id: *const c_char) -> *const size_t;

    pub fn mlpackNumRowRow(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumColRow(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumElemRow(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackArmaPtrRow(params: *mut c_void, id: *const c_char) -> *const c_double;

    pub fn mlpackNumRowCol(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumColCol(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumElemCol(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackArmaPtrCol(params: *mut c_void, id: *const c_char) -> *const c_double;

    pub fn mlpackNumRowUrow(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumColUrow(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumElemUrow(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackArmaPtrUrow(params: *mut c_void, id: *const c_char) -> *const size_t;

    pub fn mlpackNumRowUcol(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumColUcol(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumElemUcol(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackArmaPtrUcol(params: *mut c_void, id: *const c_char) -> *const size_t;

    pub fn mlpackNumRowMatWithInfo(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumColMatWithInfo(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackNumElemMatWithInfo(params: *mut c_void, id: *const c_char) -> size_t;
    pub fn mlpackArmaPtrMatWithInfo(params: *mut c_void, id: *const c_char) -> *const c_double;

    /// Categorical flags of a matrix-with-info output, one per native row.
    pub fn mlpackArmaInfoPtrMatWithInfo(params: *mut c_void, id: *const c_char) -> *const bool;
}

// =============================================================================
// Models
// =============================================================================

#[link(name = "mlpack_capi")]
extern "C" {

    pub fn mlpackGetAdaBoostModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetAdaBoostModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteAdaBoostModelPtr(model: *mut c_void);

    pub fn mlpackGetApproxKFNModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetApproxKFNModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteApproxKFNModelPtr(model: *mut c_void);

    pub fn mlpackGetBayesianLinearRegressionPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetBayesianLinearRegressionPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteBayesianLinearRegressionPtr(model: *mut c_void);

    pub fn mlpackGetCFModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetCFModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteCFModelPtr(model: *mut c_void);

    pub fn mlpackGetDSModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetDSModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteDSModelPtr(model: *mut c_void);

    pub fn mlpackGetDecisionTreeModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetDecisionTreeModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteDecisionTreeModelPtr(model: *mut c_void);

    pub fn mlpackGetDTreePtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetDTreePtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteDTreePtr(model: *mut c_void);

    pub fn mlpackGetFastMKSModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetFastMKSModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteFastMKSModelPtr(model: *mut c_void);

    pub fn mlpackGetGaussianKernelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetGaussianKernelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteGaussianKernelPtr(model: *mut c_void);

    pub fn mlpackGetGMMPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetGMMPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteGMMPtr(model: *mut c_void);

    pub fn mlpackGetHMMModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetHMMModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteHMMModelPtr(model: *mut c_void);

    pub fn mlpackGetHoeffdingTreeModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetHoeffdingTreeModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteHoeffdingTreeModelPtr(model: *mut c_void);

    pub fn mlpackGetKDEModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetKDEModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteKDEModelPtr(model: *mut c_void);

    pub fn mlpackGetKFNModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetKFNModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteKFNModelPtr(model: *mut c_void);

    pub fn mlpackGetKNNModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetKNNModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteKNNModelPtr(model: *mut c_void);

    pub fn mlpackGetLARSPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetLARSPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteLARSPtr(model: *mut c_void);

    pub fn mlpackGetLinearRegressionPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetLinearRegressionPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteLinearRegressionPtr(model: *mut c_void);

    pub fn mlpackGetLinearSVMModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetLinearSVMModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteLinearSVMModelPtr(model: *mut c_void);

    pub fn mlpackGetLocalCoordinateCodingPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetLocalCoordinateCodingPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteLocalCoordinateCodingPtr(model: *mut c_void);

    pub fn mlpackGetLogisticRegressionPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetLogisticRegressionPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteLogisticRegressionPtr(model: *mut c_void);

    pub fn mlpackGetLSHSearchPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetLSHSearchPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteLSHSearchPtr(model: *mut c_void);

    pub fn mlpackGetNBCModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetNBCModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteNBCModelPtr(model: *mut c_void);

    pub fn mlpackGetPerceptronModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetPerceptronModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeletePerceptronModelPtr(model: *mut c_void);

    pub fn mlpackGetRAModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetRAModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteRAModelPtr(model: *mut c_void);

    pub fn mlpackGetRandomForestModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetRandomForestModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteRandomForestModelPtr(model: *mut c_void);

    pub fn mlpackGetRSModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetRSModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteRSModelPtr(model: *mut c_void);

    pub fn mlpackGetScalingModelPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetScalingModelPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteScalingModelPtr(model: *mut c_void);

    pub fn mlpackGetSoftmaxRegressionPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetSoftmaxRegressionPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteSoftmaxRegressionPtr(model: *mut c_void);

    pub fn mlpackGetSparseCodingPtr(params: *mut c_void, id: *const c_char) -> *mut c_void;
    pub fn mlpackSetSparseCodingPtr(params: *mut c_void, id: *const c_char, model: *mut c_void);
    pub fn mlpackDeleteSparseCodingPtr(model: *mut c_void);
}

// =============================================================================
// Programs
// =============================================================================

#[link(name = "mlpack_capi")]
extern "C" {
    pub fn mlpackAdaboost(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackApproxKfn(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackBayesianLinearRegression(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackCf(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackDbscan(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackDecisionStump(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackDecisionTree(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackDet(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackEmst(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackFastmks(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackGmmGenerate(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackGmmProbability(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackGmmTrain(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackHmmGenerate(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackHmmLoglik(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackHmmTrain(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackHmmViterbi(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackHoeffdingTree(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackImageConverter(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackKde(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackKernelPca(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackKfn(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackKmeans(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackKnn(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackKrann(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackLars(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackLinearRegression(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackLinearSvm(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackLmnn(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackLocalCoordinateCoding(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackLogisticRegression(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackLsh(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackMeanShift(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackNbc(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackNca(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackNmf(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackPca(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackPerceptron(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackPreprocessBinarize(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackPreprocessDescribe(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackPreprocessOneHotEncoding(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackPreprocessScale(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackPreprocessSplit(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackRadical(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackRandomForest(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackRangeSearch(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackSoftmaxRegression(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackSparseCoding(params: *mut c_void, timers: *mut c_void) -> c_int;
    pub fn mlpackTestBinding(params: *mut c_void, timers: *mut c_void) -> c_int;
}
