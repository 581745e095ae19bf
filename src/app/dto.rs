use crate::domain::capacity::CapacityStatus;
use crate::domain::course::{Course, CourseId, Student, StudentId};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    pub status: String,
    pub course_count: usize,
    pub student_count: usize,
    pub max_students_per_course: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CourseDto {
    pub id: u64,
    pub name: String,
    /// Ids of enrolled students.
    pub students: Vec<u64>,
}

impl From<Course> for CourseDto {
    fn from(c: Course) -> Self {
        Self {
            id: c.id.0,
            name: c.name,
            students: c.students.into_iter().map(|s| s.0).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StudentDto {
    pub id: u64,
    pub name: String,
    /// ISO 8601 calendar date (`YYYY-MM-DD`).
    pub birth_date: Option<NaiveDate>,
}

impl From<Student> for StudentDto {
    fn from(s: Student) -> Self {
        Self {
            id: s.id.0,
            name: s.name,
            birth_date: s.birth_date,
        }
    }
}

/// Query string accepted by the course list endpoint.
///
/// A blank value (`?name=`) is the same as leaving the filter out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CourseListQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub name: Option<String>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateCourseRequest {
    pub name: String,
    #[serde(default)]
    pub students: Vec<u64>,
}

/// Full replacement (PUT); omitted `students` clears the enrollment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCourseRequest {
    pub name: String,
    #[serde(default)]
    pub students: Vec<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PatchCourseRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub students: Option<Vec<u64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateStudentRequest {
    pub name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CapacityResponse {
    pub course_id: u64,
    pub count: usize,
    pub max: usize,
    pub status: CapacityStatus,
}

pub(crate) fn student_ids(ids: Vec<u64>) -> Vec<StudentId> {
    ids.into_iter().map(StudentId).collect()
}

pub(crate) fn course_id(id: u64) -> CourseId {
    CourseId(id)
}
