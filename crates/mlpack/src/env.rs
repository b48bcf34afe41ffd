//! Parameter environments: one native parameter set and timer set per call.
//!
//! An [`Environment`] moves through four states:
//!
//! ```text
//! Fresh --set/push/mark--> Populated --invoke--> Invoked --close--> Closed
//!   |                          |                                       ^
//!   +--------------------------+------------------close----------------+
//! ```
//!
//! Writes are legal before [`Environment::invoke`], reads only after it, and
//! nothing is legal once closed. Dropping an open environment closes it, so
//! the native parameter and timer sets are released on every exit path.
//!
//! Opening an environment disables native backtraces and verbose output.
//! The verbosity flag is shared through the bridge's
//! [`VerbosityScope`](crate::bridge::VerbosityScope): it stays on while any
//! open environment asked for verbose output, and once the last environment
//! closes it returns to the value it had before the first one opened.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use ndarray::{Array2, ArrayView2};
use tracing::{debug, trace, warn};

use crate::bridge::{BridgeFault, RawModel, RawParams, RawTimers};
use crate::error::{MlpackError, Result};
use crate::matrix::{self, Flavor, MatrixWithInfo};
use crate::model::{ModelKind, ModelOwner};
use crate::runtime::Runtime;

/// Lifecycle state of an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvState {
    Fresh,
    Populated,
    Invoked,
    Closed,
}

/// A model read back from an output slot.
pub(crate) enum TakenModel {
    /// A new model; the caller becomes its owner.
    Produced(RawModel),
    /// One of the models lent to this environment, handed back by the
    /// program.
    Lent(Arc<ModelOwner>),
}

/// A scoped native parameter environment for one program call.
///
/// The lifetime `'m` bounds the models lent to the environment with
/// `install`; they must outlive it.
pub struct Environment<'m> {
    runtime: Runtime,
    program: String,
    params: RawParams,
    timers: RawTimers,
    state: EnvState,
    loud: bool,
    lent: HashMap<usize, Arc<ModelOwner>>,
    captured: HashSet<String>,
    opened_at: Instant,
    _borrows: PhantomData<&'m ()>,
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('\0') {
        return Err(MlpackError::InvalidName(name.to_owned()));
    }
    Ok(())
}

impl<'m> Environment<'m> {
    // =========================================================================
    // Open / Close
    // =========================================================================

    /// Create the parameter and timer sets for `program`.
    pub fn open(runtime: &Runtime, program: &str) -> Result<Self> {
        check_name(program)?;
        let bridge = runtime.bridge();
        let params = bridge
            .new_params(program)
            .map_err(|fault| map_fault(program, fault))?;
        let timers = match bridge.new_timers() {
            Ok(timers) => timers,
            Err(fault) => {
                bridge.free_params(params);
                return Err(map_fault(program, fault));
            }
        };

        bridge.disable_backtrace();
        bridge.verbosity().enter(bridge);
        debug!(program, bridge = bridge.name(), "opened environment");

        Ok(Self {
            runtime: runtime.clone(),
            program: program.to_owned(),
            params,
            timers,
            state: EnvState::Fresh,
            loud: false,
            lent: HashMap::new(),
            captured: HashSet::new(),
            opened_at: Instant::now(),
            _borrows: PhantomData,
        })
    }

    /// Release the native sets and restore the verbosity flag.
    ///
    /// Closing twice is a lifecycle error; dropping a closed environment is a
    /// no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.state == EnvState::Closed {
            return Err(MlpackError::lifecycle(format!(
                "environment for '{}' is already closed",
                self.program
            )));
        }
        self.release();
        Ok(())
    }

    fn release(&mut self) {
        self.state = EnvState::Closed;
        let bridge = self.runtime.bridge();
        // Reverse order of acquisition.
        bridge.free_timers(self.timers);
        bridge.free_params(self.params);
        self.lent.clear();
        bridge.verbosity().leave(bridge, self.loud);
        debug!(
            program = %self.program,
            elapsed_ms = self.opened_at.elapsed().as_secs_f64() * 1e3,
            "closed environment"
        );
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn state(&self) -> EnvState {
        self.state
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    // =========================================================================
    // State Checks
    // =========================================================================

    fn begin_write(&mut self, name: &str) -> Result<RawParams> {
        check_name(name)?;
        match self.state {
            EnvState::Fresh | EnvState::Populated => {
                self.state = EnvState::Populated;
                Ok(self.params)
            }
            EnvState::Invoked => Err(MlpackError::lifecycle(format!(
                "cannot write '{name}': '{}' was already invoked",
                self.program
            ))),
            EnvState::Closed => Err(self.closed_error(name)),
        }
    }

    fn begin_read(&self, name: &str) -> Result<RawParams> {
        check_name(name)?;
        match self.state {
            EnvState::Invoked => Ok(self.params),
            EnvState::Closed => Err(self.closed_error(name)),
            EnvState::Fresh | EnvState::Populated => Err(MlpackError::lifecycle(format!(
                "cannot read '{name}': '{}' has not been invoked",
                self.program
            ))),
        }
    }

    fn closed_error(&self, name: &str) -> MlpackError {
        MlpackError::lifecycle(format!(
            "cannot access '{name}': environment for '{}' is closed",
            self.program
        ))
    }

    fn fault(&self, fault: BridgeFault) -> MlpackError {
        map_fault(&self.program, fault)
    }

    // =========================================================================
    // Writers
    // =========================================================================

    pub fn set_bool(&mut self, name: &str, value: bool) -> Result<()> {
        let params = self.begin_write(name)?;
        trace!(name, value, "set bool");
        self.runtime
            .bridge()
            .set_bool(params, name, value)
            .map_err(|f| self.fault(f))
    }

    pub fn set_int(&mut self, name: &str, value: i32) -> Result<()> {
        let params = self.begin_write(name)?;
        trace!(name, value, "set int");
        self.runtime
            .bridge()
            .set_int(params, name, value)
            .map_err(|f| self.fault(f))
    }

    pub fn set_double(&mut self, name: &str, value: f64) -> Result<()> {
        let params = self.begin_write(name)?;
        trace!(name, value, "set double");
        self.runtime
            .bridge()
            .set_double(params, name, value)
            .map_err(|f| self.fault(f))
    }

    pub fn set_string(&mut self, name: &str, value: &str) -> Result<()> {
        let params = self.begin_write(name)?;
        if value.contains('\0') {
            return Err(MlpackError::InvalidName(value.to_owned()));
        }
        trace!(name, value, "set string");
        self.runtime
            .bridge()
            .set_string(params, name, value)
            .map_err(|f| self.fault(f))
    }

    pub fn set_vec_int(&mut self, name: &str, value: &[i32]) -> Result<()> {
        let params = self.begin_write(name)?;
        trace!(name, len = value.len(), "set int vector");
        self.runtime
            .bridge()
            .set_vec_int(params, name, value)
            .map_err(|f| self.fault(f))
    }

    pub fn set_vec_string(&mut self, name: &str, value: &[String]) -> Result<()> {
        let params = self.begin_write(name)?;
        if let Some(bad) = value.iter().find(|s| s.contains('\0')) {
            return Err(MlpackError::InvalidName(bad.clone()));
        }
        trace!(name, len = value.len(), "set string vector");
        self.runtime
            .bridge()
            .set_vec_string(params, name, value)
            .map_err(|f| self.fault(f))
    }

    /// Mark `name` as supplied (input) or requested (output).
    pub fn mark_passed(&mut self, name: &str) -> Result<()> {
        let params = self.begin_write(name)?;
        self.runtime
            .bridge()
            .set_passed(params, name)
            .map_err(|f| self.fault(f))
    }

    /// Push a host matrix in the given flavor and mark it passed. Matrix
    /// flavors are transposed so that host rows become native columns.
    pub fn push_matrix(&mut self, name: &str, value: ArrayView2<'_, f64>, flavor: Flavor) -> Result<()> {
        self.push_matrix_with(name, value, flavor, true)
    }

    /// [`Environment::push_matrix`] with explicit control over transposition
    /// of matrix flavors. Vector flavors ignore `transpose`.
    pub fn push_matrix_with(
        &mut self,
        name: &str,
        value: ArrayView2<'_, f64>,
        flavor: Flavor,
        transpose: bool,
    ) -> Result<()> {
        check_name(name)?;
        // Convert before touching the environment so a bad matrix leaves it
        // unchanged.
        let params = match flavor {
            Flavor::Matrix | Flavor::Row | Flavor::Col => {
                let native = matrix::push_real(name, value, flavor, transpose)?;
                let params = self.begin_write(name)?;
                let bridge = self.runtime.bridge();
                let stored = match flavor {
                    Flavor::Matrix => bridge.set_mat(params, name, &native),
                    Flavor::Row => bridge.set_row(params, name, native.as_slice()),
                    _ => bridge.set_col(params, name, native.as_slice()),
                };
                stored.map_err(|f| self.fault(f))?;
                params
            }
            Flavor::UMatrix | Flavor::URow | Flavor::UCol => {
                let native = matrix::push_unsigned(name, value, flavor, transpose)?;
                let params = self.begin_write(name)?;
                let bridge = self.runtime.bridge();
                let stored = match flavor {
                    Flavor::UMatrix => bridge.set_umat(params, name, &native),
                    Flavor::URow => bridge.set_urow(params, name, native.as_slice()),
                    _ => bridge.set_ucol(params, name, native.as_slice()),
                };
                stored.map_err(|f| self.fault(f))?;
                params
            }
            Flavor::MatrixWithInfo => {
                let info = MatrixWithInfo::numeric(value.to_owned());
                return self.push_matrix_with_info(name, &info);
            }
        };
        trace!(name, %flavor, dims = ?value.dim(), "pushed matrix");
        self.runtime
            .bridge()
            .set_passed(params, name)
            .map_err(|f| self.fault(f))
    }

    /// Push a matrix with per-column categorical flags and mark it passed.
    pub fn push_matrix_with_info(&mut self, name: &str, value: &MatrixWithInfo) -> Result<()> {
        check_name(name)?;
        let native = matrix::push_with_info(name, value)?;
        let params = self.begin_write(name)?;
        let bridge = self.runtime.bridge();
        bridge
            .set_mat_with_info(params, name, &native)
            .and_then(|()| bridge.set_passed(params, name))
            .map_err(|f| self.fault(f))?;
        trace!(name, dims = ?value.data().dim(), "pushed matrix with info");
        Ok(())
    }

    /// Request native verbose output for the rest of this environment's life.
    pub fn enable_verbose(&mut self) -> Result<()> {
        if self.state == EnvState::Closed {
            return Err(self.closed_error("verbose"));
        }
        if !self.loud {
            self.loud = true;
            let bridge = self.runtime.bridge();
            bridge.verbosity().louden(bridge);
        }
        Ok(())
    }

    /// Whether this environment asked for verbose output.
    pub fn is_verbose(&self) -> bool {
        self.loud
    }

    pub(crate) fn lend_model(&mut self, name: &str, owner: &Arc<ModelOwner>) -> Result<()> {
        let kind = owner.kind();
        let model = owner.raw().ok_or_else(|| {
            MlpackError::lifecycle(format!("{kind:?} model lent as '{name}' was already released"))
        })?;
        let params = self.begin_write(name)?;
        trace!(name, ?kind, addr = model.addr(), "lent model");
        self.runtime
            .bridge()
            .set_model(params, kind, name, model)
            .map_err(|f| self.fault(f))?;
        self.lent.insert(model.addr(), Arc::clone(owner));
        Ok(())
    }

    // =========================================================================
    // Invoke
    // =========================================================================

    /// Run the program against the populated environment.
    pub fn invoke(&mut self) -> Result<()> {
        match self.state {
            EnvState::Fresh | EnvState::Populated => {}
            EnvState::Invoked => {
                return Err(MlpackError::lifecycle(format!(
                    "'{}' was already invoked",
                    self.program
                )))
            }
            EnvState::Closed => return Err(self.closed_error(&self.program)),
        }
        let started = Instant::now();
        let result = self
            .runtime
            .bridge()
            .invoke(&self.program, self.params, self.timers);
        let elapsed_ms = started.elapsed().as_secs_f64() * 1e3;
        match result {
            Ok(()) => {
                self.state = EnvState::Invoked;
                debug!(program = %self.program, elapsed_ms, "invoked");
                Ok(())
            }
            Err(fault) => {
                debug!(program = %self.program, elapsed_ms, %fault, "invocation failed");
                Err(self.fault(fault))
            }
        }
    }

    // =========================================================================
    // Readers
    // =========================================================================

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        let params = self.begin_read(name)?;
        self.runtime
            .bridge()
            .get_bool(params, name)
            .map_err(|f| self.fault(f))
    }

    pub fn get_int(&self, name: &str) -> Result<i32> {
        let params = self.begin_read(name)?;
        self.runtime
            .bridge()
            .get_int(params, name)
            .map_err(|f| self.fault(f))
    }

    pub fn get_double(&self, name: &str) -> Result<f64> {
        let params = self.begin_read(name)?;
        self.runtime
            .bridge()
            .get_double(params, name)
            .map_err(|f| self.fault(f))
    }

    pub fn get_string(&self, name: &str) -> Result<String> {
        let params = self.begin_read(name)?;
        self.runtime
            .bridge()
            .get_string(params, name)
            .map_err(|f| self.fault(f))
    }

    pub fn get_vec_int(&self, name: &str) -> Result<Vec<i32>> {
        let params = self.begin_read(name)?;
        self.runtime
            .bridge()
            .get_vec_int(params, name)
            .map_err(|f| self.fault(f))
    }

    pub fn get_vec_string(&self, name: &str) -> Result<Vec<String>> {
        let params = self.begin_read(name)?;
        self.runtime
            .bridge()
            .get_vec_string(params, name)
            .map_err(|f| self.fault(f))
    }

    /// Read a matrix output back into host orientation. `None` when the
    /// program left the output empty.
    pub fn pull_matrix(&self, name: &str, flavor: Flavor) -> Result<Option<Array2<f64>>> {
        let params = self.begin_read(name)?;
        let bridge = self.runtime.bridge();
        let pulled = match flavor {
            Flavor::Matrix => bridge
                .get_mat(params, name)
                .map(|m| matrix::pull_real(m, flavor)),
            Flavor::Row => bridge
                .get_row(params, name)
                .map(|v| matrix::pull_real(matrix::NativeMatrix::row(v), flavor)),
            Flavor::Col => bridge
                .get_col(params, name)
                .map(|v| matrix::pull_real(matrix::NativeMatrix::col(v), flavor)),
            Flavor::UMatrix => bridge
                .get_umat(params, name)
                .map(|m| matrix::pull_unsigned(m, flavor)),
            Flavor::URow => bridge
                .get_urow(params, name)
                .map(|v| matrix::pull_unsigned(matrix::NativeMatrix::row(v), flavor)),
            Flavor::UCol => bridge
                .get_ucol(params, name)
                .map(|v| matrix::pull_unsigned(matrix::NativeMatrix::col(v), flavor)),
            Flavor::MatrixWithInfo => bridge
                .get_mat_with_info(params, name)
                .map(|m| matrix::pull_with_info(m).map(|m| m.into_parts().0)),
        }
        .map_err(|f| self.fault(f))?;
        trace!(name, %flavor, dims = ?pulled.as_ref().map(|m| m.dim()), "pulled matrix");
        Ok(pulled)
    }

    pub fn pull_matrix_with_info(&self, name: &str) -> Result<Option<MatrixWithInfo>> {
        let params = self.begin_read(name)?;
        let native = self
            .runtime
            .bridge()
            .get_mat_with_info(params, name)
            .map_err(|f| self.fault(f))?;
        Ok(matrix::pull_with_info(native))
    }

    /// Take ownership of the model produced into `name`. Each output can be
    /// taken once. A program that returns one of its lent models yields that
    /// model's owner instead of a second one.
    pub(crate) fn take_model(&mut self, kind: ModelKind, name: &str) -> Result<Option<TakenModel>> {
        let params = self.begin_read(name)?;
        if !self.captured.insert(name.to_owned()) {
            return Err(MlpackError::lifecycle(format!(
                "model output '{name}' of '{}' was already captured",
                self.program
            )));
        }
        let model = self
            .runtime
            .bridge()
            .get_model(params, kind, name)
            .map_err(|f| self.fault(f))?;
        let Some(model) = model else {
            trace!(name, ?kind, "no model produced");
            return Ok(None);
        };
        match self.lent.get(&model.addr()) {
            None => {
                trace!(name, ?kind, addr = model.addr(), "captured model");
                Ok(Some(TakenModel::Produced(model)))
            }
            Some(owner) if owner.kind() == kind => {
                debug!(name, ?kind, addr = model.addr(), "output is a lent model");
                Ok(Some(TakenModel::Lent(Arc::clone(owner))))
            }
            Some(owner) => Err(MlpackError::lifecycle(format!(
                "model output '{name}' is the lent {:?} model, not a {kind:?}",
                owner.kind()
            ))),
        }
    }
}

impl Drop for Environment<'_> {
    fn drop(&mut self) {
        if self.state != EnvState::Closed {
            if std::thread::panicking() {
                warn!(program = %self.program, "closing environment during unwind");
            }
            self.release();
        }
    }
}

impl fmt::Debug for Environment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("program", &self.program)
            .field("state", &self.state)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

pub(crate) fn map_fault(program: &str, fault: BridgeFault) -> MlpackError {
    match fault {
        BridgeFault::Native(reason) => MlpackError::bridge(program, reason),
        BridgeFault::Lifecycle(reason) => MlpackError::Lifecycle(reason),
    }
}
