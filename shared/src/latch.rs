use std::cell::Cell;

/// One-shot gate: [`OnceLatch::fire`] returns `true` exactly once until
/// [`OnceLatch::reset`].
#[derive(Debug, Default)]
pub struct OnceLatch {
    fired: Cell<bool>,
}

impl OnceLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fire(&self) -> bool {
        !self.fired.replace(true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }

    /// Re-arm, e.g. when the page switches to another article.
    pub fn reset(&self) {
        self.fired.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::OnceLatch;

    #[test]
    fn fires_once_per_arm() {
        let latch = OnceLatch::new();
        assert!(latch.fire());
        assert!(!latch.fire());
        assert!(latch.has_fired());
        latch.reset();
        assert!(latch.fire());
    }
}
