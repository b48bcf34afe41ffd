//! The boundary between the host runtime and an mlpack implementation.
//!
//! A [`Bridge`] exposes the flat, name-keyed surface every mlpack program
//! shares: create a parameter environment and a timer set, fill named slots,
//! mark slots as passed, invoke a program by id, read named slots back and
//! release everything. Environments, entries and model handles are written
//! against this trait only.
//!
//! Two implementations ship with the crate:
//!
//! - `NativeBridge` (feature `native`) calls into `libmlpack_capi`.
//! - [`ReferenceBridge`](crate::testing::ReferenceBridge) is an in-process
//!   emulation used by the test-suite and for development without mlpack.

use std::ffi::c_void;
use std::ptr::NonNull;

use parking_lot::Mutex;
use thiserror::Error;

use crate::matrix::{NativeMatrix, NativeMatrixWithInfo};
use crate::model::ModelKind;

#[cfg(feature = "native")]
mod native;
#[cfg(feature = "native")]
pub use native::NativeBridge;

// =============================================================================
// Raw Handles
// =============================================================================

macro_rules! raw_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(transparent)]
        pub struct $name(NonNull<c_void>);

        impl $name {
            /// Wrap a native address; `None` for null.
            pub fn from_ptr(ptr: *mut c_void) -> Option<Self> {
                NonNull::new(ptr).map(Self)
            }

            pub fn as_ptr(self) -> *mut c_void {
                self.0.as_ptr()
            }

            /// The address as an integer, used as a registry key.
            pub fn addr(self) -> usize {
                self.0.as_ptr() as usize
            }
        }
    };
}

raw_handle! {
    /// Address of a native parameter environment.
    RawParams
}

raw_handle! {
    /// Address of a native timer set.
    RawTimers
}

raw_handle! {
    /// Address of a native model object.
    RawModel
}

// =============================================================================
// Faults
// =============================================================================

/// Failure reported by a bridge implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeFault {
    /// The native side rejected the request.
    #[error("{0}")]
    Native(String),

    /// The request referenced an object that is not alive (e.g. a model freed
    /// twice).
    #[error("{0}")]
    Lifecycle(String),
}

pub type BridgeResult<T> = std::result::Result<T, BridgeFault>;

// =============================================================================
// Verbosity
// =============================================================================

/// Shares one verbosity flag among environments that overlap in time.
///
/// While any environment is open the flag is on exactly when at least one of
/// them asked for verbose output. When the last one closes, the flag returns
/// to the value it had before the first one opened.
#[derive(Debug)]
pub struct VerbosityScope {
    state: Mutex<ScopeState>,
}

#[derive(Debug)]
struct ScopeState {
    open: usize,
    loud: usize,
    baseline: bool,
}

impl ScopeState {
    fn apply(&self, bridge: &dyn Bridge) {
        let on = if self.open == 0 {
            self.baseline
        } else {
            self.loud > 0
        };
        if on {
            bridge.enable_verbose();
        } else {
            bridge.disable_verbose();
        }
    }
}

impl VerbosityScope {
    pub const fn new() -> Self {
        Self {
            state: parking_lot::const_mutex(ScopeState {
                open: 0,
                loud: 0,
                baseline: false,
            }),
        }
    }

    /// An environment opened: quiet unless another one is loud.
    pub(crate) fn enter(&self, bridge: &dyn Bridge) {
        let mut state = self.state.lock();
        if state.open == 0 {
            state.baseline = bridge.verbose();
        }
        state.open += 1;
        state.apply(bridge);
    }

    /// An open environment asked for verbose output.
    pub(crate) fn louden(&self, bridge: &dyn Bridge) {
        let mut state = self.state.lock();
        state.loud += 1;
        state.apply(bridge);
    }

    /// An environment closed; `loud` says whether it had asked for output.
    pub(crate) fn leave(&self, bridge: &dyn Bridge, loud: bool) {
        let mut state = self.state.lock();
        state.open = state.open.saturating_sub(1);
        if loud {
            state.loud = state.loud.saturating_sub(1);
        }
        state.apply(bridge);
    }

    /// Number of environments currently open.
    pub fn open_environments(&self) -> usize {
        self.state.lock().open
    }
}

impl Default for VerbosityScope {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Bridge Trait
// =============================================================================

/// The native surface shared by all mlpack programs.
///
/// Matrices cross as column-major buffers plus native `(rows, cols)`.
/// Getters return owned copies. A getter for a slot that was never written
/// returns the type's empty value (`0`, `""`, an empty matrix, no model).
///
/// Implementations must be usable from several threads at once for
/// *different* environments; a single environment is only ever driven from
/// one thread at a time.
pub trait Bridge: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    // -- environment ---------------------------------------------------------

    fn new_params(&self, program: &str) -> BridgeResult<RawParams>;
    fn free_params(&self, params: RawParams);
    fn new_timers(&self) -> BridgeResult<RawTimers>;
    fn free_timers(&self, timers: RawTimers);

    // -- scalars -------------------------------------------------------------

    fn set_bool(&self, params: RawParams, name: &str, value: bool) -> BridgeResult<()>;
    fn set_int(&self, params: RawParams, name: &str, value: i32) -> BridgeResult<()>;
    fn set_double(&self, params: RawParams, name: &str, value: f64) -> BridgeResult<()>;
    fn set_string(&self, params: RawParams, name: &str, value: &str) -> BridgeResult<()>;
    fn set_vec_int(&self, params: RawParams, name: &str, value: &[i32]) -> BridgeResult<()>;
    fn set_vec_string(&self, params: RawParams, name: &str, value: &[String]) -> BridgeResult<()>;

    fn get_bool(&self, params: RawParams, name: &str) -> BridgeResult<bool>;
    fn get_int(&self, params: RawParams, name: &str) -> BridgeResult<i32>;
    fn get_double(&self, params: RawParams, name: &str) -> BridgeResult<f64>;
    fn get_string(&self, params: RawParams, name: &str) -> BridgeResult<String>;
    fn get_vec_int(&self, params: RawParams, name: &str) -> BridgeResult<Vec<i32>>;
    fn get_vec_string(&self, params: RawParams, name: &str) -> BridgeResult<Vec<String>>;

    // -- matrices ------------------------------------------------------------

    fn set_mat(&self, params: RawParams, name: &str, value: &NativeMatrix<f64>) -> BridgeResult<()>;
    fn set_umat(&self, params: RawParams, name: &str, value: &NativeMatrix<usize>) -> BridgeResult<()>;
    fn set_row(&self, params: RawParams, name: &str, value: &[f64]) -> BridgeResult<()>;
    fn set_col(&self, params: RawParams, name: &str, value: &[f64]) -> BridgeResult<()>;
    fn set_urow(&self, params: RawParams, name: &str, value: &[usize]) -> BridgeResult<()>;
    fn set_ucol(&self, params: RawParams, name: &str, value: &[usize]) -> BridgeResult<()>;
    fn set_mat_with_info(
        &self,
        params: RawParams,
        name: &str,
        value: &NativeMatrixWithInfo,
    ) -> BridgeResult<()>;

    fn get_mat(&self, params: RawParams, name: &str) -> BridgeResult<NativeMatrix<f64>>;
    fn get_umat(&self, params: RawParams, name: &str) -> BridgeResult<NativeMatrix<usize>>;
    fn get_row(&self, params: RawParams, name: &str) -> BridgeResult<Vec<f64>>;
    fn get_col(&self, params: RawParams, name: &str) -> BridgeResult<Vec<f64>>;
    fn get_urow(&self, params: RawParams, name: &str) -> BridgeResult<Vec<usize>>;
    fn get_ucol(&self, params: RawParams, name: &str) -> BridgeResult<Vec<usize>>;
    fn get_mat_with_info(&self, params: RawParams, name: &str) -> BridgeResult<NativeMatrixWithInfo>;

    // -- passed flags --------------------------------------------------------

    /// Mark a slot as supplied (inputs) or requested (outputs).
    fn set_passed(&self, params: RawParams, name: &str) -> BridgeResult<()>;

    // -- models --------------------------------------------------------------

    /// Take the model produced into `name`. Ownership moves to the caller;
    /// the environment will no longer free it.
    fn get_model(&self, params: RawParams, kind: ModelKind, name: &str)
        -> BridgeResult<Option<RawModel>>;

    /// Lend `model` to the environment. The environment never frees it.
    fn set_model(
        &self,
        params: RawParams,
        kind: ModelKind,
        name: &str,
        model: RawModel,
    ) -> BridgeResult<()>;

    /// Destroy a model previously obtained from [`Bridge::get_model`].
    fn free_model(&self, kind: ModelKind, model: RawModel) -> BridgeResult<()>;

    // -- process-wide flags --------------------------------------------------

    fn disable_backtrace(&self);
    fn enable_verbose(&self);
    fn disable_verbose(&self);
    fn verbose(&self) -> bool;

    /// The scope arbitrating this bridge's verbosity flag. Bridges that share
    /// one native flag must return the same scope.
    fn verbosity(&self) -> &VerbosityScope;

    // -- programs ------------------------------------------------------------

    /// Run `program` against a populated environment.
    fn invoke(&self, program: &str, params: RawParams, timers: RawTimers) -> BridgeResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_handles_reject_null() {
        assert!(RawParams::from_ptr(std::ptr::null_mut()).is_none());
        let mut slot = 0u8;
        let raw = RawModel::from_ptr((&mut slot as *mut u8).cast()).unwrap();
        assert_eq!(raw.addr(), &slot as *const u8 as usize);
    }

    #[test]
    fn overlapping_scopes_restore_the_first_baseline() {
        let bridge = crate::testing::ReferenceBridge::new();
        let scope = VerbosityScope::new();

        scope.enter(&bridge);
        scope.louden(&bridge);
        assert!(bridge.verbose());
        // A quiet neighbour does not silence the loud one.
        scope.enter(&bridge);
        assert!(bridge.verbose());
        scope.leave(&bridge, true);
        assert!(!bridge.verbose());
        assert_eq!(scope.open_environments(), 1);
        scope.leave(&bridge, false);
        assert!(!bridge.verbose());
        assert_eq!(scope.open_environments(), 0);
    }

    #[test]
    fn a_verbose_baseline_survives_quiet_scopes() {
        let bridge = crate::testing::ReferenceBridge::new();
        let scope = VerbosityScope::new();
        bridge.enable_verbose();

        scope.enter(&bridge);
        assert!(!bridge.verbose());
        scope.enter(&bridge);
        scope.leave(&bridge, false);
        assert!(!bridge.verbose());
        scope.leave(&bridge, false);
        assert!(bridge.verbose());
    }
}
