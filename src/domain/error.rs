use crate::domain::course::{CourseId, StudentId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("course {0} not found")]
    CourseNotFound(CourseId),

    #[error("student {0} not found")]
    StudentNotFound(StudentId),

    #[error("unknown students: {}", join_ids(.0))]
    UnknownStudents(Vec<StudentId>),

    #[error("course has {count} students, the maximum is {max}")]
    CapacityExceeded { count: usize, max: usize },

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::CourseNotFound(_) | DomainError::StudentNotFound(_)
        )
    }
}

fn join_ids(ids: &[StudentId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
