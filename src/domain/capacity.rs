//! Student-per-course capacity rule.
//!
//! A course is meaningful when it has between one and `max` students,
//! inclusive. Writes that would push a course past `max` are rejected by the
//! service; an empty course is allowed to exist but reports [`CapacityStatus::Empty`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CapacityStatus {
    Empty,
    Within,
    Exceeded,
}

impl CapacityStatus {
    pub fn is_within(self) -> bool {
        matches!(self, CapacityStatus::Within)
    }
}

pub fn check(count: usize, max: usize) -> CapacityStatus {
    if count == 0 {
        CapacityStatus::Empty
    } else if count > max {
        CapacityStatus::Exceeded
    } else {
        CapacityStatus::Within
    }
}
