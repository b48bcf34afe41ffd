//! Testing utilities: an in-process bridge and a few reference programs.
//!
//! The module is always compiled so that downstream crates can test code
//! written against the entries without linking mlpack.
//!
//! ```
//! use std::sync::Arc;
//! use mlpack::testing::ReferenceBridge;
//!
//! let bridge = Arc::new(ReferenceBridge::new());
//! let runtime = bridge.runtime();
//! assert_eq!(runtime.bridge().name(), "reference");
//! assert_eq!(bridge.outstanding_params(), 0);
//! ```

mod programs;
mod reference;

use std::sync::Arc;

use crate::runtime::Runtime;

pub use programs::{GaussianKernel, PerceptronWeights};
pub use reference::{Invocation, Program, ProgramContext, ProgramResult, ReferenceBridge, Slot};

/// A fresh reference bridge and a runtime over it.
pub fn reference_runtime() -> (Runtime, Arc<ReferenceBridge>) {
    let bridge = Arc::new(ReferenceBridge::new());
    (bridge.runtime(), bridge)
}
