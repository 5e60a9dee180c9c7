/// Rising-edge detector over a sampled boolean level.
///
/// Reports `true` only for a sample that is high while the previous sample was
/// low, so a held level produces exactly one edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    previous: bool,
}

impl EdgeDetector {
    pub const fn new() -> Self {
        Self { previous: false }
    }

    /// Feed the current level; returns whether it is a rising edge.
    pub fn rising(&mut self, level: bool) -> bool {
        let edge = level && !self.previous;
        self.previous = level;
        edge
    }

    /// Level seen on the previous sample.
    pub fn previous(&self) -> bool {
        self.previous
    }

    pub fn clear(&mut self) {
        self.previous = false;
    }
}
