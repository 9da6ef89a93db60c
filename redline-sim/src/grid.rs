// World positions map onto a coarse grid of 20-unit cells anchored at a
// genesis point; an external, eventually-consistent consumer wants to hear
// about cell crossings. Submission is fire-and-forget and out of scope here;
// this just detects crossings and encodes the deltas.

const GRID_SIZE: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellCrossing {
    pub delta_x: i64,
    pub delta_z: i64,
}

impl CellCrossing {
    // The consumer's wire encoding: negative -> 0, zero -> 1, positive -> 2
    pub fn contract_deltas(&self) -> (u8, u8) {
        (encode_delta(self.delta_x), encode_delta(self.delta_z))
    }
}

fn encode_delta(delta: i64) -> u8 {
    match delta.signum() {
        -1 => 0,
        0 => 1,
        _ => 2,
    }
}

pub struct GridTracker {
    genesis_x: f64,
    genesis_z: f64,
    last_cell: (i64, i64),
}

impl GridTracker {
    // The racing minigame anchors its verified position off-grid from the
    // track; the overworld starts at the genesis point itself
    pub fn racing() -> Self {
        GridTracker::anchored(400.0, 400.0, 283.0, 458.0)
    }

    pub fn overworld() -> Self {
        GridTracker::anchored(400.0, 400.0, 400.0, 400.0)
    }

    fn anchored(genesis_x: f64, genesis_z: f64, anchor_x: f64, anchor_z: f64) -> Self {
        GridTracker {
            genesis_x,
            genesis_z,
            last_cell: (
                cell_of(anchor_x, genesis_x),
                cell_of(anchor_z, genesis_z),
            ),
        }
    }

    // At most one crossing is reported per observation; the new cell becomes
    // the reference immediately (no waiting on remote acknowledgement)
    pub fn observe(&mut self, x: f64, z: f64) -> Option<CellCrossing> {
        let cell = (cell_of(x, self.genesis_x), cell_of(z, self.genesis_z));
        if cell == self.last_cell {
            return None;
        }

        let crossing = CellCrossing {
            delta_x: cell.0 - self.last_cell.0,
            delta_z: cell.1 - self.last_cell.1,
        };
        self.last_cell = cell;
        Some(crossing)
    }
}

fn cell_of(coord: f64, genesis: f64) -> i64 {
    ((coord - genesis) / GRID_SIZE).floor() as i64
}
