//! Single-register calculator memory (M+/M-/MR/MC).

/// One accumulating value, starting at zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryRegister {
    value: f64,
}

impl MemoryRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// M+: add to the register.
    pub fn add(&mut self, x: f64) {
        self.value += x;
    }

    /// M-: subtract from the register.
    pub fn subtract(&mut self, x: f64) {
        self.value -= x;
    }

    /// MR: read without modifying.
    pub fn recall(&self) -> f64 {
        self.value
    }

    /// MC: reset to zero.
    pub fn clear(&mut self) {
        self.value = 0.0;
    }
}
