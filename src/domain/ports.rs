use crate::domain::course::{
    Course, CourseId, CoursePatch, CourseQuery, NewCourse, NewStudent, Student, StudentId,
};
use crate::domain::error::DomainError;

/// Storage port for courses and students (implemented by Infrastructure)
///
/// Implementations enforce referential integrity between courses and
/// students; business rules such as capacity are checked by the application
/// service.
pub trait CourseRepository: Send + Sync {
    /// Fails with [`DomainError::UnknownStudents`] if any enrolled id is
    /// missing; the check and the write happen under one lock.
    fn insert_course(&self, course: NewCourse) -> Result<Course, DomainError>;

    fn course(&self, id: CourseId) -> Option<Course>;

    /// Courses matching `query`, in ascending id order
    fn courses(&self, query: &CourseQuery) -> Vec<Course>;

    /// Same student check as [`CourseRepository::insert_course`] when the
    /// patch replaces the enrollment.
    fn update_course(&self, id: CourseId, patch: CoursePatch) -> Result<Course, DomainError>;

    fn delete_course(&self, id: CourseId) -> Result<(), DomainError>;

    fn insert_student(&self, student: NewStudent) -> Student;

    fn student(&self, id: StudentId) -> Option<Student>;

    fn students(&self) -> Vec<Student>;

    /// Remove a student and unlink it from every course
    fn delete_student(&self, id: StudentId) -> Result<(), DomainError>;

    fn student_count(&self) -> usize;
}
