//! Shared handle to a bridge implementation.

use std::fmt;
use std::sync::Arc;

use crate::bridge::Bridge;

/// A cheap, clonable handle to the bridge every entry and model runs against.
///
/// Model handles keep a clone so they can release themselves after the entry
/// that produced them has returned.
#[derive(Clone)]
pub struct Runtime {
    bridge: Arc<dyn Bridge>,
}

impl Runtime {
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self { bridge }
    }

    /// Wrap an owned bridge.
    pub fn with_bridge<B: Bridge + 'static>(bridge: B) -> Self {
        Self::new(Arc::new(bridge))
    }

    /// A runtime linked against `libmlpack_capi`.
    #[cfg(feature = "native")]
    pub fn native() -> Self {
        Self::with_bridge(crate::bridge::NativeBridge::new())
    }

    /// A runtime over a fresh in-process
    /// [`ReferenceBridge`](crate::testing::ReferenceBridge).
    pub fn reference() -> Self {
        crate::testing::reference_runtime().0
    }

    #[inline]
    pub fn bridge(&self) -> &dyn Bridge {
        self.bridge.as_ref()
    }

    /// Current state of the process-wide verbosity flag.
    pub fn verbose(&self) -> bool {
        self.bridge.verbose()
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("bridge", &self.bridge.name())
            .finish()
    }
}
