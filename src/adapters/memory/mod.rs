//! In-process repository backed by ordered maps.
//!
//! Each instance is an isolated store with its own id sequences, which makes a
//! fresh repository the equivalent of a clean per-test database.

use crate::domain::course::{
    Course, CourseId, CoursePatch, CourseQuery, NewCourse, NewStudent, Student, StudentId,
};
use crate::domain::error::DomainError;
use crate::domain::ports::CourseRepository;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
pub struct InMemoryRepository {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    courses: BTreeMap<CourseId, Course>,
    students: BTreeMap<StudentId, Student>,
    last_course_id: u64,
    last_student_id: u64,
}

impl Tables {
    fn ensure_students(&self, ids: &[StudentId]) -> Result<(), DomainError> {
        let missing: Vec<StudentId> = ids
            .iter()
            .copied()
            .filter(|id| !self.students.contains_key(id))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::UnknownStudents(missing))
        }
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CourseRepository for InMemoryRepository {
    fn insert_course(&self, course: NewCourse) -> Result<Course, DomainError> {
        let mut tables = self.write();
        tables.ensure_students(&course.students)?;
        tables.last_course_id += 1;
        let course = Course {
            id: CourseId(tables.last_course_id),
            name: course.name,
            students: course.students,
        };
        tables.courses.insert(course.id, course.clone());
        Ok(course)
    }

    fn course(&self, id: CourseId) -> Option<Course> {
        self.read().courses.get(&id).cloned()
    }

    fn courses(&self, query: &CourseQuery) -> Vec<Course> {
        let tables = self.read();
        match query.id {
            Some(id) => tables
                .courses
                .get(&id)
                .filter(|c| query.matches(c))
                .cloned()
                .into_iter()
                .collect(),
            None => tables
                .courses
                .values()
                .filter(|c| query.matches(c))
                .cloned()
                .collect(),
        }
    }

    fn update_course(&self, id: CourseId, patch: CoursePatch) -> Result<Course, DomainError> {
        let mut tables = self.write();
        if let Some(students) = &patch.students {
            tables.ensure_students(students)?;
        }
        let course = tables
            .courses
            .get_mut(&id)
            .ok_or(DomainError::CourseNotFound(id))?;
        patch.apply(course);
        Ok(course.clone())
    }

    fn delete_course(&self, id: CourseId) -> Result<(), DomainError> {
        self.write()
            .courses
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::CourseNotFound(id))
    }

    fn insert_student(&self, student: NewStudent) -> Student {
        let mut tables = self.write();
        tables.last_student_id += 1;
        let student = Student {
            id: StudentId(tables.last_student_id),
            name: student.name,
            birth_date: student.birth_date,
        };
        tables.students.insert(student.id, student.clone());
        student
    }

    fn student(&self, id: StudentId) -> Option<Student> {
        self.read().students.get(&id).cloned()
    }

    fn students(&self) -> Vec<Student> {
        self.read().students.values().cloned().collect()
    }

    fn delete_student(&self, id: StudentId) -> Result<(), DomainError> {
        let mut tables = self.write();
        tables
            .students
            .remove(&id)
            .ok_or(DomainError::StudentNotFound(id))?;
        for course in tables.courses.values_mut() {
            course.students.retain(|s| *s != id);
        }
        Ok(())
    }

    fn student_count(&self) -> usize {
        self.read().students.len()
    }
}
