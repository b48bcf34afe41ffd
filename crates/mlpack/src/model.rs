//! Handles to native model objects.
//!
//! A model produced by one entry can be fed to later entries as an input.
//! Every model type gets its own handle type so a GMM cannot be handed to a
//! program that expects an HMM. All handles share the same contract:
//!
//! - `capture` takes ownership of a model output after an invocation.
//! - `install` lends the model to an environment as an input. The
//!   environment never frees a lent model.
//! - Dropping the handle (or calling `release`) frees the native object
//!   exactly once.
//!
//! Some programs hand their input model back as the output model. The
//! captured output then shares the native object with the input handle, and
//! the object is freed when the last of the two is dropped.
//!
//! Handles are `Send` but not `Sync`: a model can move between threads, but
//! two concurrent calls must not share it, whether through one handle or two
//! that share a model.

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{trace, warn};

use crate::bridge::RawModel;
use crate::env::{map_fault, Environment, TakenModel};
use crate::error::{MlpackError, Result};
use crate::runtime::Runtime;

// =============================================================================
// Shared Handle
// =============================================================================

/// The single owner of a native model, shared by every handle that refers to
/// it.
pub(crate) struct ModelOwner {
    runtime: Runtime,
    kind: ModelKind,
    raw: Option<RawModel>,
}

// SAFETY: the owner only hands out the address and frees it once, from
// whichever thread drops the last reference.
unsafe impl Send for ModelOwner {}
unsafe impl Sync for ModelOwner {}

impl ModelOwner {
    pub(crate) fn kind(&self) -> ModelKind {
        self.kind
    }

    pub(crate) fn raw(&self) -> Option<RawModel> {
        self.raw
    }

    fn free(&mut self) -> Result<()> {
        let Some(raw) = self.raw.take() else {
            return Ok(());
        };
        trace!(kind = ?self.kind, addr = raw.addr(), "releasing model");
        self.runtime
            .bridge()
            .free_model(self.kind, raw)
            .map_err(|fault| map_fault(self.kind.native_stem(), fault))
    }
}

impl Drop for ModelOwner {
    fn drop(&mut self) {
        if let Err(err) = self.free() {
            warn!(kind = ?self.kind, %err, "failed to release model");
        }
    }
}

/// Handle shared by every typed model wrapper.
pub struct ModelHandle {
    kind: ModelKind,
    owner: Option<Arc<ModelOwner>>,
    _not_sync: PhantomData<Cell<()>>,
}

impl ModelHandle {
    fn capture(env: &mut Environment<'_>, kind: ModelKind, name: &str) -> Result<Option<Self>> {
        let owner = match env.take_model(kind, name)? {
            None => return Ok(None),
            Some(TakenModel::Produced(raw)) => Arc::new(ModelOwner {
                runtime: env.runtime().clone(),
                kind,
                raw: Some(raw),
            }),
            Some(TakenModel::Lent(owner)) => owner,
        };
        Ok(Some(Self {
            kind,
            owner: Some(owner),
            _not_sync: PhantomData,
        }))
    }

    fn install<'m>(&'m self, env: &mut Environment<'m>, name: &str) -> Result<()> {
        let owner = self.owner.as_ref().ok_or_else(|| {
            MlpackError::lifecycle(format!("{:?} model was already released", self.kind))
        })?;
        env.lend_model(name, owner)
    }

    /// Give up this handle's share; the model is freed with the last share.
    fn free(&mut self) -> Result<()> {
        let Some(owner) = self.owner.take() else {
            return Ok(());
        };
        match Arc::into_inner(owner) {
            Some(mut owner) => owner.free(),
            None => {
                trace!(kind = ?self.kind, "model still shared, not released");
                Ok(())
            }
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// The native address, while the model is alive.
    pub fn raw(&self) -> Option<RawModel> {
        self.owner.as_ref().and_then(|owner| owner.raw())
    }

    /// Whether `other` refers to the same native model.
    pub fn shares_model_with(&self, other: &ModelHandle) -> bool {
        match (&self.owner, &other.owner) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Drop for ModelHandle {
    fn drop(&mut self) {
        if let Err(err) = self.free() {
            warn!(kind = ?self.kind, %err, "failed to release model");
        }
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("kind", &self.kind)
            .field("raw", &self.raw().map(RawModel::addr))
            .finish()
    }
}

// =============================================================================
// Typed Handles
// =============================================================================

/// Define the [`ModelKind`] enum and one handle type per kind.
macro_rules! define_models {
    ($($(#[$attr:meta])* $handle:ident => $kind:ident($stem:literal);)*) => {
        /// The native model types that can cross the bridge.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ModelKind {
            $($kind,)*
        }

        impl ModelKind {
            pub const ALL: &'static [ModelKind] = &[$(ModelKind::$kind,)*];

            /// The type name used in native accessor symbols, e.g. `GMM` in
            /// `mlpackGetGMMPtr`.
            pub fn native_stem(self) -> &'static str {
                match self {
                    $(ModelKind::$kind => $stem,)*
                }
            }
        }

        $(
            $(#[$attr])*
            #[derive(Debug)]
            pub struct $handle {
                handle: ModelHandle,
            }

            impl $handle {
                pub const KIND: ModelKind = ModelKind::$kind;

                /// Take the model produced into output `name`. `None` when the
                /// program produced no model.
                pub fn capture(env: &mut Environment<'_>, name: &str) -> Result<Option<Self>> {
                    Ok(ModelHandle::capture(env, Self::KIND, name)?.map(|handle| Self { handle }))
                }

                /// Lend this model to `env` as input `name`.
                pub fn install<'m>(&'m self, env: &mut Environment<'m>, name: &str) -> Result<()> {
                    self.handle.install(env, name)
                }

                /// Free the native model now instead of at drop. When another
                /// handle shares the model, only this handle's share is given up.
                pub fn release(mut self) -> Result<()> {
                    self.handle.free()
                }

                pub fn handle(&self) -> &ModelHandle {
                    &self.handle
                }
            }
        )*
    };
}

define_models! {
    /// A trained AdaBoost ensemble.
    AdaBoostModel => AdaBoost("AdaBoostModel");
    /// An approximate furthest-neighbor search structure.
    ApproxKfnModel => ApproxKfn("ApproxKFNModel");
    /// A Bayesian linear regression model.
    BayesianLinearRegressionModel => BayesianLinearRegression("BayesianLinearRegression");
    /// A collaborative-filtering model (factorized rating matrix plus neighborhood settings).
    CfModel => Cf("CFModel");
    /// A single-level decision tree.
    DecisionStumpModel => DecisionStump("DSModel");
    /// A trained decision tree classifier.
    DecisionTreeModel => DecisionTree("DecisionTreeModel");
    /// A density estimation tree.
    DetModel => Det("DTree");
    /// A fast max-kernel search structure.
    FastMksModel => FastMks("FastMKSModel");
    /// A Gaussian kernel. Only the test program produces these.
    GaussianKernelModel => GaussianKernel("GaussianKernel");
    /// A Gaussian mixture model.
    GmmModel => Gmm("GMM");
    /// A hidden Markov model.
    HmmModel => Hmm("HMMModel");
    /// A streaming Hoeffding tree classifier.
    HoeffdingTreeModel => HoeffdingTree("HoeffdingTreeModel");
    /// A kernel density estimation model.
    KdeModel => Kde("KDEModel");
    /// An exact furthest-neighbor search structure.
    KfnModel => Kfn("KFNModel");
    /// A nearest-neighbor search structure.
    KnnModel => Knn("KNNModel");
    /// A LARS / LASSO / elastic-net model.
    LarsModel => Lars("LARS");
    /// An ordinary or ridge linear regression model.
    LinearRegressionModel => LinearRegression("LinearRegression");
    /// A linear support vector machine.
    LinearSvmModel => LinearSvm("LinearSVMModel");
    /// A local coordinate coding dictionary.
    LocalCoordinateCodingModel => LocalCoordinateCoding("LocalCoordinateCoding");
    /// A binary logistic regression model.
    LogisticRegressionModel => LogisticRegression("LogisticRegression");
    /// A locality-sensitive hashing search structure.
    LshModel => Lsh("LSHSearch");
    /// A naive Bayes classifier.
    NbcModel => Nbc("NBCModel");
    /// A multiclass perceptron.
    PerceptronModel => Perceptron("PerceptronModel");
    /// A rank-approximate nearest-neighbor search structure.
    RannModel => Rann("RAModel");
    /// A random forest classifier.
    RandomForestModel => RandomForest("RandomForestModel");
    /// A range search structure.
    RangeSearchModel => RangeSearch("RSModel");
    /// A fitted feature scaler.
    ScalingModel => Scaling("ScalingModel");
    /// A softmax regression classifier.
    SoftmaxRegressionModel => SoftmaxRegression("SoftmaxRegression");
    /// A sparse coding dictionary.
    SparseCodingModel => SparseCoding("SparseCoding");
}
