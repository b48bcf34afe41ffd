//! An in-process bridge that emulates the native parameter registry.
//!
//! Parameter environments, timer sets and models are real heap allocations
//! tracked in registries keyed by address, so leaks and double frees are
//! observable through [`ReferenceBridge::outstanding_params`] and friends.
//! Programs are plain Rust closures registered by id; a handful of small
//! reference programs are installed by [`ReferenceBridge::new`].

use std::any::Any;
use std::collections::{BTreeSet, HashMap};
use std::ffi::c_void;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use tracing::{trace, warn};

use crate::bridge::{
    Bridge, BridgeFault, BridgeResult, RawModel, RawParams, RawTimers, VerbosityScope,
};
use crate::matrix::{NativeMatrix, NativeMatrixWithInfo};
use crate::model::ModelKind;
use crate::runtime::Runtime;

use super::programs;

// =============================================================================
// Slots
// =============================================================================

/// A typed value held in a parameter slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Bool(bool),
    Int(i32),
    Double(f64),
    String(String),
    VecInt(Vec<i32>),
    VecString(Vec<String>),
    Mat(NativeMatrix<f64>),
    UMat(NativeMatrix<usize>),
    Row(Vec<f64>),
    Col(Vec<f64>),
    URow(Vec<usize>),
    UCol(Vec<usize>),
    MatWithInfo(NativeMatrixWithInfo),
    /// A model address. `owned` models are freed with the environment.
    Model {
        kind: ModelKind,
        addr: usize,
        owned: bool,
    },
}

impl Slot {
    fn type_name(&self) -> &'static str {
        match self {
            Slot::Bool(_) => "bool",
            Slot::Int(_) => "int",
            Slot::Double(_) => "double",
            Slot::String(_) => "string",
            Slot::VecInt(_) => "vector<int>",
            Slot::VecString(_) => "vector<string>",
            Slot::Mat(_) => "mat",
            Slot::UMat(_) => "umat",
            Slot::Row(_) => "row",
            Slot::Col(_) => "col",
            Slot::URow(_) => "urow",
            Slot::UCol(_) => "ucol",
            Slot::MatWithInfo(_) => "mat with info",
            Slot::Model { .. } => "model",
        }
    }
}

fn type_fault(name: &str, held: &Slot, wanted: &str) -> BridgeFault {
    BridgeFault::Native(format!(
        "parameter '{name}' holds a {} and cannot be used as a {wanted}",
        held.type_name()
    ))
}

/// One parameter environment.
#[derive(Debug)]
pub(crate) struct ParamStore {
    program: String,
    slots: HashMap<String, Slot>,
    passed: BTreeSet<String>,
}

impl ParamStore {
    fn put(&mut self, name: &str, slot: Slot) -> BridgeResult<()> {
        if let Some(held) = self.slots.get(name) {
            if mem::discriminant(held) != mem::discriminant(&slot) {
                return Err(type_fault(name, held, slot.type_name()));
            }
        }
        self.slots.insert(name.to_owned(), slot);
        Ok(())
    }
}

#[derive(Debug)]
struct TimerStore {
    #[allow(dead_code)]
    created: Instant,
}

pub(crate) struct StoredModel {
    kind: ModelKind,
    payload: Box<dyn Any + Send>,
}

pub(crate) type ModelArena = HashMap<usize, Box<StoredModel>>;

fn register_model(models: &mut ModelArena, kind: ModelKind, payload: Box<dyn Any + Send>) -> usize {
    let mut boxed = Box::new(StoredModel { kind, payload });
    let addr = &mut *boxed as *mut StoredModel as usize;
    models.insert(addr, boxed);
    addr
}

// =============================================================================
// Program Context
// =============================================================================

/// The view a reference program has of its environment.
///
/// Inputs are visible only when marked passed. Outputs are stored only when
/// requested (marked passed); writes to other outputs are dropped.
pub struct ProgramContext<'a> {
    store: &'a mut ParamStore,
    models: &'a mut ModelArena,
}

/// Result type of reference programs; the message becomes the bridge error.
pub type ProgramResult = std::result::Result<(), String>;

macro_rules! scalar_reader {
    ($(#[$attr:meta])* $fn_name:ident, $variant:ident, $ty:ty) => {
        $(#[$attr])*
        pub fn $fn_name(&self, name: &str, default: $ty) -> Result<$ty, String> {
            match self.input(name) {
                None => Ok(default),
                Some(Slot::$variant(value)) => Ok(value.clone()),
                Some(held) => Err(type_fault(name, held, stringify!($fn_name)).to_string()),
            }
        }
    };
}

macro_rules! slot_reader {
    ($fn_name:ident, $variant:ident, $ty:ty) => {
        pub fn $fn_name(&self, name: &str) -> Result<Option<&$ty>, String> {
            match self.input(name) {
                None => Ok(None),
                Some(Slot::$variant(value)) => {
                    let value: &$ty = value;
                    Ok(Some(value))
                }
                Some(held) => Err(type_fault(name, held, stringify!($fn_name)).to_string()),
            }
        }
    };
}

macro_rules! slot_writer {
    ($fn_name:ident, $variant:ident, $ty:ty) => {
        pub fn $fn_name(&mut self, name: &str, value: $ty) -> ProgramResult {
            self.output(name, Slot::$variant(value))
        }
    };
}

impl ProgramContext<'_> {
    pub fn program(&self) -> &str {
        &self.store.program
    }

    pub fn passed(&self, name: &str) -> bool {
        self.store.passed.contains(name)
    }

    fn input(&self, name: &str) -> Option<&Slot> {
        if self.passed(name) {
            self.store.slots.get(name)
        } else {
            None
        }
    }

    fn output(&mut self, name: &str, slot: Slot) -> ProgramResult {
        if !self.passed(name) {
            trace!(name, "output not requested");
            return Ok(());
        }
        self.store.put(name, slot).map_err(|f| f.to_string())
    }

    scalar_reader!(
        /// The value of `name`, or `default` when it was not passed.
        bool, Bool, bool
    );
    scalar_reader!(int, Int, i32);
    scalar_reader!(double, Double, f64);
    scalar_reader!(string, String, String);
    scalar_reader!(vec_int, VecInt, Vec<i32>);
    scalar_reader!(vec_string, VecString, Vec<String>);

    slot_reader!(matrix, Mat, NativeMatrix<f64>);
    slot_reader!(umatrix, UMat, NativeMatrix<usize>);
    slot_reader!(row, Row, [f64]);
    slot_reader!(col, Col, [f64]);
    slot_reader!(urow, URow, [usize]);
    slot_reader!(ucol, UCol, [usize]);
    slot_reader!(matrix_with_info, MatWithInfo, NativeMatrixWithInfo);

    fn input_model_addr(&self, name: &str, kind: ModelKind) -> Result<Option<usize>, String> {
        match self.input(name) {
            None => Ok(None),
            Some(Slot::Model { kind: held, addr, .. }) if *held == kind => Ok(Some(*addr)),
            Some(held) => Err(type_fault(name, held, "model").to_string()),
        }
    }

    /// A passed input model of the given kind, downcast to its payload.
    pub fn model<T: Any>(&self, name: &str, kind: ModelKind) -> Result<Option<&T>, String> {
        let Some(addr) = self.input_model_addr(name, kind)? else {
            return Ok(None);
        };
        let stored = self
            .models
            .get(&addr)
            .ok_or_else(|| format!("model '{name}' is no longer alive"))?;
        stored
            .payload
            .downcast_ref::<T>()
            .map(Some)
            .ok_or_else(|| format!("model '{name}' has an unexpected payload"))
    }

    /// Replace the payload of the lent input model `name` in place.
    pub fn update_model<T: Any + Send>(&mut self, name: &str, kind: ModelKind, payload: T) -> ProgramResult {
        let addr = self
            .input_model_addr(name, kind)?
            .ok_or_else(|| format!("model '{name}' was not passed"))?;
        let stored = self
            .models
            .get_mut(&addr)
            .ok_or_else(|| format!("model '{name}' is no longer alive"))?;
        stored.payload = Box::new(payload);
        Ok(())
    }

    /// Return the lent input model `input` as output `output`. Both slots
    /// then hold the same model, which stays with its lender.
    pub fn forward_model(&mut self, input: &str, output: &str) -> ProgramResult {
        let slot = match self.input(input) {
            Some(Slot::Model { kind, addr, .. }) => Slot::Model {
                kind: *kind,
                addr: *addr,
                owned: false,
            },
            Some(held) => return Err(type_fault(input, held, "model").to_string()),
            None => return Err(format!("model '{input}' was not passed")),
        };
        self.output(output, slot)
    }

    slot_writer!(set_bool, Bool, bool);
    slot_writer!(set_int, Int, i32);
    slot_writer!(set_double, Double, f64);
    slot_writer!(set_string, String, String);
    slot_writer!(set_vec_int, VecInt, Vec<i32>);
    slot_writer!(set_vec_string, VecString, Vec<String>);
    slot_writer!(set_matrix, Mat, NativeMatrix<f64>);
    slot_writer!(set_umatrix, UMat, NativeMatrix<usize>);
    slot_writer!(set_row, Row, Vec<f64>);
    slot_writer!(set_col, Col, Vec<f64>);
    slot_writer!(set_urow, URow, Vec<usize>);
    slot_writer!(set_ucol, UCol, Vec<usize>);
    slot_writer!(set_matrix_with_info, MatWithInfo, NativeMatrixWithInfo);

    /// Produce a model into output `name`. The environment owns it until the
    /// caller captures it.
    pub fn set_model<T: Any + Send>(&mut self, name: &str, kind: ModelKind, payload: T) -> ProgramResult {
        if !self.passed(name) {
            return Ok(());
        }
        if let Some(Slot::Model {
            addr, owned: true, ..
        }) = self.store.slots.get(name)
        {
            self.models.remove(addr);
        }
        let addr = register_model(self.models, kind, Box::new(payload));
        self.store
            .put(name, Slot::Model {
                kind,
                addr,
                owned: true,
            })
            .map_err(|f| f.to_string())
    }
}

// =============================================================================
// Bridge
// =============================================================================

/// A program body.
pub type Program = Arc<dyn Fn(&mut ProgramContext<'_>) -> ProgramResult + Send + Sync>;

/// What the bridge observed when a program was invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    /// Every slot marked passed, inputs and outputs alike.
    pub passed: BTreeSet<String>,
    /// Verbosity flag at the moment of the call.
    pub verbose: bool,
    /// Backtrace flag at the moment of the call.
    pub backtrace: bool,
}

#[derive(Default)]
struct State {
    params: HashMap<usize, Box<ParamStore>>,
    timers: HashMap<usize, Box<TimerStore>>,
    models: ModelArena,
    history: Vec<Invocation>,
}

/// In-process [`Bridge`] implementation.
pub struct ReferenceBridge {
    state: Mutex<State>,
    programs: RwLock<HashMap<String, Program>>,
    verbose: AtomicBool,
    verbosity: VerbosityScope,
    backtrace: AtomicBool,
}

impl Default for ReferenceBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceBridge {
    /// A bridge with the built-in reference programs registered.
    pub fn new() -> Self {
        let bridge = Self::empty();
        programs::register_builtin(&bridge);
        bridge
    }

    /// A bridge with no programs registered.
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(State::default()),
            programs: RwLock::new(HashMap::new()),
            verbose: AtomicBool::new(false),
            verbosity: VerbosityScope::new(),
            backtrace: AtomicBool::new(true),
        }
    }

    /// Wrap this bridge in a [`Runtime`].
    pub fn runtime(self: &Arc<Self>) -> Runtime {
        Runtime::new(self.clone())
    }

    /// Register (or replace) the program `id`.
    pub fn register_program<F>(&self, id: &str, program: F)
    where
        F: Fn(&mut ProgramContext<'_>) -> ProgramResult + Send + Sync + 'static,
    {
        self.programs.write().insert(id.to_owned(), Arc::new(program));
    }

    pub fn has_program(&self, id: &str) -> bool {
        self.programs.read().contains_key(id)
    }

    /// Number of parameter environments not yet freed.
    pub fn outstanding_params(&self) -> usize {
        self.state.lock().params.len()
    }

    /// Number of timer sets not yet freed.
    pub fn outstanding_timers(&self) -> usize {
        self.state.lock().timers.len()
    }

    /// Number of models alive, whether owned by an environment or a caller.
    pub fn outstanding_models(&self) -> usize {
        self.state.lock().models.len()
    }

    /// Every invocation so far, oldest first.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.state.lock().history.clone()
    }

    pub fn last_invocation(&self) -> Option<Invocation> {
        self.state.lock().history.last().cloned()
    }

    pub fn backtrace_enabled(&self) -> bool {
        self.backtrace.load(Ordering::SeqCst)
    }

    /// Read a model payload directly, for assertions.
    pub fn inspect_model<T: Any + Clone>(&self, model: RawModel) -> Option<T> {
        let state = self.state.lock();
        state
            .models
            .get(&model.addr())
            .and_then(|stored| stored.payload.downcast_ref::<T>())
            .cloned()
    }

    fn with_store<T>(
        &self,
        params: RawParams,
        f: impl FnOnce(&mut ParamStore) -> BridgeResult<T>,
    ) -> BridgeResult<T> {
        let mut state = self.state.lock();
        let store = state.params.get_mut(&params.addr()).ok_or_else(|| {
            BridgeFault::Lifecycle(format!(
                "parameter environment {:#x} is not alive",
                params.addr()
            ))
        })?;
        f(store)
    }

    fn put(&self, params: RawParams, name: &str, slot: Slot) -> BridgeResult<()> {
        trace!(name, kind = slot.type_name(), "reference set");
        self.with_store(params, |store| store.put(name, slot))
    }

    fn read<T>(
        &self,
        params: RawParams,
        name: &str,
        wanted: &str,
        empty: T,
        f: impl FnOnce(&Slot) -> Option<T>,
    ) -> BridgeResult<T> {
        self.with_store(params, |store| match store.slots.get(name) {
            None => Ok(empty),
            Some(held) => f(held).ok_or_else(|| type_fault(name, held, wanted)),
        })
    }
}

fn as_ptr<T>(boxed: &mut Box<T>) -> *mut c_void {
    &mut **boxed as *mut T as *mut c_void
}

macro_rules! getter {
    ($fn_name:ident, $variant:ident, $ty:ty, $empty:expr) => {
        fn $fn_name(&self, params: RawParams, name: &str) -> BridgeResult<$ty> {
            self.read(params, name, stringify!($variant), $empty, |slot| match slot {
                Slot::$variant(value) => Some(value.clone()),
                _ => None,
            })
        }
    };
}

impl Bridge for ReferenceBridge {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn new_params(&self, program: &str) -> BridgeResult<RawParams> {
        if !self.has_program(program) {
            return Err(BridgeFault::Native(format!("unknown program '{program}'")));
        }
        let mut boxed = Box::new(ParamStore {
            program: program.to_owned(),
            slots: HashMap::new(),
            passed: BTreeSet::new(),
        });
        let raw = RawParams::from_ptr(as_ptr(&mut boxed))
            .ok_or_else(|| BridgeFault::Native("allocation failed".into()))?;
        self.state.lock().params.insert(raw.addr(), boxed);
        Ok(raw)
    }

    fn free_params(&self, params: RawParams) {
        let mut state = self.state.lock();
        let Some(store) = state.params.remove(&params.addr()) else {
            warn!(addr = params.addr(), "freeing unknown parameter environment");
            return;
        };
        // Produced models that were never captured die with the environment.
        for slot in store.slots.values() {
            if let Slot::Model {
                addr, owned: true, ..
            } = slot
            {
                state.models.remove(addr);
            }
        }
    }

    fn new_timers(&self) -> BridgeResult<RawTimers> {
        let mut boxed = Box::new(TimerStore {
            created: Instant::now(),
        });
        let raw = RawTimers::from_ptr(as_ptr(&mut boxed))
            .ok_or_else(|| BridgeFault::Native("allocation failed".into()))?;
        self.state.lock().timers.insert(raw.addr(), boxed);
        Ok(raw)
    }

    fn free_timers(&self, timers: RawTimers) {
        if self.state.lock().timers.remove(&timers.addr()).is_none() {
            warn!(addr = timers.addr(), "freeing unknown timer set");
        }
    }

    fn set_bool(&self, params: RawParams, name: &str, value: bool) -> BridgeResult<()> {
        self.put(params, name, Slot::Bool(value))
    }

    fn set_int(&self, params: RawParams, name: &str, value: i32) -> BridgeResult<()> {
        self.put(params, name, Slot::Int(value))
    }

    fn set_double(&self, params: RawParams, name: &str, value: f64) -> BridgeResult<()> {
        self.put(params, name, Slot::Double(value))
    }

    fn set_string(&self, params: RawParams, name: &str, value: &str) -> BridgeResult<()> {
        self.put(params, name, Slot::String(value.to_owned()))
    }

    fn set_vec_int(&self, params: RawParams, name: &str, value: &[i32]) -> BridgeResult<()> {
        self.put(params, name, Slot::VecInt(value.to_vec()))
    }

    fn set_vec_string(&self, params: RawParams, name: &str, value: &[String]) -> BridgeResult<()> {
        self.put(params, name, Slot::VecString(value.to_vec()))
    }

    getter!(get_bool, Bool, bool, false);
    getter!(get_int, Int, i32, 0);
    getter!(get_double, Double, f64, 0.0);
    getter!(get_string, String, String, String::new());
    getter!(get_vec_int, VecInt, Vec<i32>, Vec::new());
    getter!(get_vec_string, VecString, Vec<String>, Vec::new());

    fn set_mat(&self, params: RawParams, name: &str, value: &NativeMatrix<f64>) -> BridgeResult<()> {
        self.put(params, name, Slot::Mat(value.clone()))
    }

    fn set_umat(&self, params: RawParams, name: &str, value: &NativeMatrix<usize>) -> BridgeResult<()> {
        self.put(params, name, Slot::UMat(value.clone()))
    }

    fn set_row(&self, params: RawParams, name: &str, value: &[f64]) -> BridgeResult<()> {
        self.put(params, name, Slot::Row(value.to_vec()))
    }

    fn set_col(&self, params: RawParams, name: &str, value: &[f64]) -> BridgeResult<()> {
        self.put(params, name, Slot::Col(value.to_vec()))
    }

    fn set_urow(&self, params: RawParams, name: &str, value: &[usize]) -> BridgeResult<()> {
        self.put(params, name, Slot::URow(value.to_vec()))
    }

    fn set_ucol(&self, params: RawParams, name: &str, value: &[usize]) -> BridgeResult<()> {
        self.put(params, name, Slot::UCol(value.to_vec()))
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
        self.put(params, name, Slot::MatWithInfo(value.clone()))
    }

    getter!(get_mat, Mat, NativeMatrix<f64>, NativeMatrix::empty());
    getter!(get_umat, UMat, NativeMatrix<usize>, NativeMatrix::empty());
    getter!(get_row, Row, Vec<f64>, Vec::new());
    getter!(get_col, Col, Vec<f64>, Vec::new());
    getter!(get_urow, URow, Vec<usize>, Vec::new());
    getter!(get_ucol, UCol, Vec<usize>, Vec::new());
    getter!(
        get_mat_with_info,
        MatWithInfo,
        NativeMatrixWithInfo,
        NativeMatrixWithInfo {
            info: Vec::new(),
            matrix: NativeMatrix::empty(),
        }
    );

    fn set_passed(&self, params: RawParams, name: &str) -> BridgeResult<()> {
        self.with_store(params, |store| {
            store.passed.insert(name.to_owned());
            Ok(())
        })
    }

    fn get_model(
        &self,
        params: RawParams,
        kind: ModelKind,
        name: &str,
    ) -> BridgeResult<Option<RawModel>> {
        let mut state = self.state.lock();
        let State { params: stores, models, .. } = &mut *state;
        let store = stores.get_mut(&params.addr()).ok_or_else(|| {
            BridgeFault::Lifecycle(format!(
                "parameter environment {:#x} is not alive",
                params.addr()
            ))
        })?;
        let (addr, owned) = match store.slots.get(name) {
            None => return Ok(None),
            Some(Slot::Model {
                kind: held,
                addr,
                owned,
            }) if *held == kind => (*addr, *owned),
            Some(held) => return Err(type_fault(name, held, "model")),
        };
        // A produced model moves to the caller and the environment forgets
        // the slot. A lent model is only reported back.
        if owned {
            store.slots.remove(name);
        }
        let stored = models
            .get_mut(&addr)
            .ok_or_else(|| BridgeFault::Lifecycle(format!("model '{name}' is not alive")))?;
        RawModel::from_ptr(as_ptr(stored))
            .map(Some)
            .ok_or_else(|| BridgeFault::Native("null model".into()))
    }

    fn set_model(
        &self,
        params: RawParams,
        kind: ModelKind,
        name: &str,
        model: RawModel,
    ) -> BridgeResult<()> {
        {
            let state = self.state.lock();
            let stored = state.models.get(&model.addr()).ok_or_else(|| {
                BridgeFault::Lifecycle(format!("model {:#x} is not alive", model.addr()))
            })?;
            if stored.kind != kind {
                return Err(BridgeFault::Native(format!(
                    "'{name}' expects a {kind:?} model, got {:?}",
                    stored.kind
                )));
            }
        }
        self.put(
            params,
            name,
            Slot::Model {
                kind,
                addr: model.addr(),
                owned: false,
            },
        )
    }

    fn free_model(&self, kind: ModelKind, model: RawModel) -> BridgeResult<()> {
        let mut state = self.state.lock();
        match state.models.get(&model.addr()) {
            None => Err(BridgeFault::Lifecycle(format!(
                "model {:#x} freed twice or never allocated",
                model.addr()
            ))),
            Some(stored) if stored.kind != kind => Err(BridgeFault::Native(format!(
                "model {:#x} is a {:?}, not a {kind:?}",
                model.addr(),
                stored.kind
            ))),
            Some(_) => {
                state.models.remove(&model.addr());
                Ok(())
            }
        }
    }

    fn disable_backtrace(&self) {
        self.backtrace.store(false, Ordering::SeqCst);
    }

    fn enable_verbose(&self) {
        self.verbose.store(true, Ordering::SeqCst);
    }

    fn disable_verbose(&self) {
        self.verbose.store(false, Ordering::SeqCst);
    }

    fn verbose(&self) -> bool {
        self.verbose.load(Ordering::SeqCst)
    }

    fn verbosity(&self) -> &VerbosityScope {
        &self.verbosity
    }

    fn invoke(&self, program: &str, params: RawParams, timers: RawTimers) -> BridgeResult<()> {
        let body = self
            .programs
            .read()
            .get(program)
            .cloned()
            .ok_or_else(|| BridgeFault::Native(format!("unknown program '{program}'")))?;

        let mut state = self.state.lock();
        if !state.timers.contains_key(&timers.addr()) {
            return Err(BridgeFault::Lifecycle(format!(
                "timer set {:#x} is not alive",
                timers.addr()
            )));
        }
        let State {
            params: stores,
            models,
            history,
            ..
        } = &mut *state;
        let store = stores.get_mut(&params.addr()).ok_or_else(|| {
            BridgeFault::Lifecycle(format!(
                "parameter environment {:#x} is not alive",
                params.addr()
            ))
        })?;
        if store.program != program {
            return Err(BridgeFault::Native(format!(
                "environment was created for '{}', not '{program}'",
                store.program
            )));
        }
        history.push(Invocation {
            program: program.to_owned(),
            passed: store.passed.clone(),
            verbose: self.verbose(),
            backtrace: self.backtrace_enabled(),
        });

        let mut ctx = ProgramContext { store, models };
        body(&mut ctx).map_err(BridgeFault::Native)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(bridge: &ReferenceBridge, program: &str) -> RawParams {
        bridge.register_program(program, |_| Ok(()));
        bridge.new_params(program).unwrap()
    }

    #[test]
    fn a_name_keeps_its_first_type() {
        let bridge = ReferenceBridge::empty();
        let params = store_with(&bridge, "noop");
        bridge.set_int(params, "k", 3).unwrap();
        let err = bridge.set_double(params, "k", 3.0).unwrap_err();
        assert!(matches!(err, BridgeFault::Native(_)));
        assert_eq!(bridge.get_int(params, "k").unwrap(), 3);
        bridge.free_params(params);
    }

    #[test]
    fn unset_slots_read_as_empty() {
        let bridge = ReferenceBridge::empty();
        let params = store_with(&bridge, "noop");
        assert_eq!(bridge.get_string(params, "missing").unwrap(), "");
        assert!(bridge.get_mat(params, "missing").unwrap().is_empty());
        assert_eq!(
            bridge.get_model(params, ModelKind::Gmm, "missing").unwrap(),
            None
        );
        bridge.free_params(params);
        assert_eq!(bridge.outstanding_params(), 0);
    }

    #[test]
    fn uncaptured_outputs_die_with_the_environment() {
        let bridge = ReferenceBridge::empty();
        bridge.register_program("make", |ctx| {
            ctx.set_model("model", ModelKind::GaussianKernel, 1.5_f64)
        });
        let params = bridge.new_params("make").unwrap();
        let timers = bridge.new_timers().unwrap();
        bridge.set_passed(params, "model").unwrap();
        bridge.invoke("make", params, timers).unwrap();
        assert_eq!(bridge.outstanding_models(), 1);
        bridge.free_timers(timers);
        bridge.free_params(params);
        assert_eq!(bridge.outstanding_models(), 0);
    }

    #[test]
    fn captured_models_outlive_the_environment_and_free_once() {
        let bridge = ReferenceBridge::empty();
        bridge.register_program("make", |ctx| {
            ctx.set_model("model", ModelKind::GaussianKernel, 1.5_f64)
        });
        let params = bridge.new_params("make").unwrap();
        let timers = bridge.new_timers().unwrap();
        bridge.set_passed(params, "model").unwrap();
        bridge.invoke("make", params, timers).unwrap();
        let model = bridge
            .get_model(params, ModelKind::GaussianKernel, "model")
            .unwrap()
            .unwrap();
        // A second take finds nothing.
        assert_eq!(
            bridge.get_model(params, ModelKind::GaussianKernel, "model").unwrap(),
            None
        );
        bridge.free_timers(timers);
        bridge.free_params(params);
        assert_eq!(bridge.inspect_model::<f64>(model), Some(1.5));
        bridge.free_model(ModelKind::GaussianKernel, model).unwrap();
        assert!(matches!(
            bridge.free_model(ModelKind::GaussianKernel, model),
            Err(BridgeFault::Lifecycle(_))
        ));
    }

    #[test]
    fn forwarded_models_stay_with_their_lender() {
        let bridge = ReferenceBridge::empty();
        bridge.register_program("make", |ctx| {
            ctx.set_model("model", ModelKind::GaussianKernel, 1.5_f64)
        });
        bridge.register_program("grow", |ctx| {
            let bandwidth = ctx
                .model::<f64>("input_model", ModelKind::GaussianKernel)?
                .copied()
                .unwrap_or_default();
            ctx.update_model("input_model", ModelKind::GaussianKernel, bandwidth * 2.0)?;
            ctx.forward_model("input_model", "output_model")
        });

        let params = bridge.new_params("make").unwrap();
        let timers = bridge.new_timers().unwrap();
        bridge.set_passed(params, "model").unwrap();
        bridge.invoke("make", params, timers).unwrap();
        let lent = bridge
            .get_model(params, ModelKind::GaussianKernel, "model")
            .unwrap()
            .unwrap();
        bridge.free_params(params);

        let params = bridge.new_params("grow").unwrap();
        bridge
            .set_model(params, ModelKind::GaussianKernel, "input_model", lent)
            .unwrap();
        bridge.set_passed(params, "input_model").unwrap();
        bridge.set_passed(params, "output_model").unwrap();
        bridge.invoke("grow", params, timers).unwrap();
        let out = bridge
            .get_model(params, ModelKind::GaussianKernel, "output_model")
            .unwrap();
        assert_eq!(out, Some(lent));
        bridge.free_timers(timers);
        bridge.free_params(params);

        assert_eq!(bridge.inspect_model::<f64>(lent), Some(3.0));
        assert_eq!(bridge.outstanding_models(), 1);
        bridge.free_model(ModelKind::GaussianKernel, lent).unwrap();
        assert_eq!(bridge.outstanding_models(), 0);
    }

    #[test]
    fn outputs_are_stored_only_when_requested() {
        let bridge = ReferenceBridge::empty();
        bridge.register_program("out", |ctx| {
            ctx.set_int("wanted", 1)?;
            ctx.set_int("unwanted", 2)
        });
        let params = bridge.new_params("out").unwrap();
        let timers = bridge.new_timers().unwrap();
        bridge.set_passed(params, "wanted").unwrap();
        bridge.invoke("out", params, timers).unwrap();
        assert_eq!(bridge.get_int(params, "wanted").unwrap(), 1);
        assert_eq!(bridge.get_int(params, "unwanted").unwrap(), 0);
        bridge.free_timers(timers);
        bridge.free_params(params);
    }

    #[test]
    fn unknown_programs_are_rejected() {
        let bridge = ReferenceBridge::empty();
        assert!(matches!(
            bridge.new_params("nope"),
            Err(BridgeFault::Native(_))
        ));
        assert_eq!(bridge.outstanding_params(), 0);
    }
}
