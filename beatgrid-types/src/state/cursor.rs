use serde::{Deserialize, Serialize};

/// Editing position: `x` is the beat, `y` the sample row, `z` the arrangement level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Cursor {
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }
}
