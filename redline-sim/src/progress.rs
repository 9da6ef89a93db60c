use std::cmp::Ordering;

use redline_core::race::RaceCarRecord;
use redline_core::CarId;

// Finished cars rank ahead of unfinished ones and among themselves by time.
// Unfinished cars compare equal on purpose: the stable sort in standings()
// keeps their insertion order.
pub fn compare_records(a: &RaceCarRecord, b: &RaceCarRecord) -> Ordering {
    match (a.finish_time, b.finish_time) {
        (Some(a_time), Some(b_time)) => a_time.cmp(&b_time),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn standings(records: &[RaceCarRecord]) -> Vec<&RaceCarRecord> {
    let mut ordered: Vec<&RaceCarRecord> = records.iter().collect();
    ordered.sort_by(|a, b| compare_records(a, b));
    ordered
}

// 1-based place of a car in the current standings
pub fn placement_of(records: &[RaceCarRecord], id: CarId) -> Option<usize> {
    standings(records)
        .iter()
        .position(|record| record.id == id)
        .map(|index| index + 1)
}
