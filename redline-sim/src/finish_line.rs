use std::time::Instant;

use redline_core::race::RaceCarRecord;
use redline_core::CarId;

// Finish-line geometry: a thin box across the track, plus how far a car has
// to get from it before a crossing counts.
#[derive(Clone, Copy, Debug)]
pub struct FinishLine {
    pub center_x: f64,
    pub half_width: f64,
    pub z: f64,
    pub thickness: f64,
    // Cars spawn on top of the line; they must first travel at least this far
    // from it or the starting gun would instantly "finish" everyone
    pub departure_distance: f64,
}

impl FinishLine {
    pub fn min_x(&self) -> f64 {
        self.center_x - self.half_width
    }

    pub fn max_x(&self) -> f64 {
        self.center_x + self.half_width
    }

    pub fn contains(&self, x: f64, z: f64) -> bool {
        x >= self.min_x() && x <= self.max_x() && (z - self.z).abs() < self.thickness
    }

    pub fn departed(&self, z: f64) -> bool {
        (z - self.z).abs() > self.departure_distance
    }
}

// Per-race crossing detector. Each car moves NOT_DEPARTED -> DEPARTED ->
// FINISHED; the first two live in the `departed` flags here, FINISHED is the
// record's finish_time, which is written exactly once.
pub struct FinishJudge {
    line: FinishLine,
    departed: Vec<bool>,
    start_time: Option<Instant>,
}

impl FinishJudge {
    pub fn new(line: FinishLine) -> Self {
        FinishJudge {
            line,
            departed: Vec::new(),
            start_time: None,
        }
    }

    pub fn line(&self) -> &FinishLine {
        &self.line
    }

    // Called when the countdown ends; crossings before this are meaningless
    pub fn start(&mut self, now: Instant) {
        self.start_time = Some(now);
    }

    pub fn reset(&mut self) {
        self.departed.clear();
        self.start_time = None;
    }

    // Inspect every car's published position and record any finishes. Returns
    // the ids of cars that crossed this tick. Idempotent for finished cars:
    // re-entering the box never re-triggers or overwrites a finish time.
    pub fn on_tick(&mut self, records: &mut [RaceCarRecord], now: Instant) -> Vec<CarId> {
        let start_time = match self.start_time {
            Some(start_time) => start_time,
            None => return Vec::new(),
        };

        if self.departed.len() < records.len() {
            self.departed.resize(records.len(), false);
        }

        let mut finishers = Vec::new();
        for (index, record) in records.iter_mut().enumerate() {
            if record.finish_time.is_some() {
                continue;
            }

            let x = record.position.x;
            let z = record.position.z;

            if self.line.departed(z) {
                self.departed[index] = true;
            }

            if self.departed[index] && self.line.contains(x, z) {
                record.finish_time = Some(now.duration_since(start_time));
                finishers.push(record.id);
            }
        }

        finishers
    }
}
