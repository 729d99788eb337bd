use std::sync::atomic::{AtomicBool, Ordering};

// One-way consent flag owned by a single flow instance.
#[derive(Debug, Default)]
pub struct ConsentGate {
    agreed: AtomicBool,
}

impl ConsentGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_given(&self) -> bool {
        self.agreed.load(Ordering::Acquire)
    }

    // Returns true only for the call that flipped the flag.
    pub fn give(&self) -> bool {
        self.agreed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
