use serde::{Deserialize, Serialize};

// ControlIntent is what a driver (human input mapping or AI) wants the car to
// do this tick. Both-true pairs are legal and have defined behavior: left wins
// over right, and backward stacks with forward at half strength.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ControlIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl ControlIntent {
    pub fn coast() -> Self {
        ControlIntent::default()
    }

    pub fn throttle() -> Self {
        ControlIntent {
            forward: true,
            ..ControlIntent::default()
        }
    }
}
