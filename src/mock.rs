use std::sync::{Arc, Mutex};

use crate::TickMask;

/// Host-side stand-in for the interrupt mask.
///
/// A single lock shared between masked foreground reads and the simulated
/// notification context: while a masked read holds it, delivery waits,
/// exactly as masked hardware delivery is held pending.
#[derive(Clone, Default)]
pub struct HostMask {
    gate: Arc<Mutex<()>>,
}

impl HostMask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` as the simulated notification context, honoring the mask.
    pub fn deliver<R>(&self, f: impl FnOnce() -> R) -> R {
        let _gate = self.gate.lock().unwrap();
        f()
    }
}

impl TickMask for HostMask {
    fn masked<R>(&self, f: impl FnOnce() -> R) -> R {
        let _gate = self.gate.lock().unwrap();
        f()
    }
}
