use crate::adapters::memory::InMemoryRepository;
use crate::app::dto::*;
use crate::config::Settings;
use crate::domain::capacity;
use crate::domain::course::{
    CoursePatch, CourseQuery, NewCourse, NewStudent, StudentId, dedup_students,
};
use crate::domain::error::DomainError;
use crate::domain::ports::CourseRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Application service for courses and students.
///
/// Cheap to clone; all clones share the same repository. Field and capacity
/// checks run before a write reaches the repository; student existence is
/// checked by the repository inside the write itself. A rejected request
/// leaves the store untouched.
#[derive(Clone)]
pub struct CourseService {
    repo: Arc<dyn CourseRepository>,
    settings: Arc<Settings>,
}

impl CourseService {
    pub fn new(repo: Arc<dyn CourseRepository>, settings: Settings) -> Self {
        Self {
            repo,
            settings: Arc::new(settings),
        }
    }

    /// Service over a fresh, empty in-memory repository.
    pub fn in_memory(settings: Settings) -> Self {
        Self::new(Arc::new(InMemoryRepository::new()), settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "ok".to_string(),
            course_count: self.repo.courses(&CourseQuery::default()).len(),
            student_count: self.repo.student_count(),
            max_students_per_course: self.settings.max_students_per_course,
        }
    }

    pub fn list_courses(&self, query: CourseListQuery) -> Vec<CourseDto> {
        let query = CourseQuery {
            id: query.id.map(course_id),
            name: query.name,
        };
        let courses = self.repo.courses(&query);
        debug!(?query, matched = courses.len(), "listed courses");
        courses.into_iter().map(CourseDto::from).collect()
    }

    pub fn get_course(&self, id: u64) -> Result<CourseDto, DomainError> {
        let id = course_id(id);
        self.repo
            .course(id)
            .map(CourseDto::from)
            .ok_or(DomainError::CourseNotFound(id))
    }

    pub fn create_course(&self, req: CreateCourseRequest) -> Result<CourseDto, DomainError> {
        let name = validate_name(req.name)?;
        let students = self.validate_students(student_ids(req.students))?;
        let course = self.repo.insert_course(NewCourse { name, students })?;
        info!(id = %course.id, name = %course.name, students = course.students.len(), "created course");
        Ok(course.into())
    }

    pub fn replace_course(
        &self,
        id: u64,
        req: UpdateCourseRequest,
    ) -> Result<CourseDto, DomainError> {
        self.patch_course(
            id,
            PatchCourseRequest {
                name: Some(req.name),
                students: Some(req.students),
            },
        )
    }

    pub fn patch_course(&self, id: u64, req: PatchCourseRequest) -> Result<CourseDto, DomainError> {
        let id = course_id(id);
        if self.repo.course(id).is_none() {
            return Err(DomainError::CourseNotFound(id));
        }
        let patch = CoursePatch {
            name: req.name.map(validate_name).transpose()?,
            students: req
                .students
                .map(|ids| self.validate_students(student_ids(ids)))
                .transpose()?,
        };
        let course = self.repo.update_course(id, patch)?;
        info!(id = %course.id, name = %course.name, students = course.students.len(), "updated course");
        Ok(course.into())
    }

    pub fn delete_course(&self, id: u64) -> Result<(), DomainError> {
        let id = course_id(id);
        self.repo.delete_course(id)?;
        info!(%id, "deleted course");
        Ok(())
    }

    pub fn capacity(&self, id: u64) -> Result<CapacityResponse, DomainError> {
        let id = course_id(id);
        let course = self.repo.course(id).ok_or(DomainError::CourseNotFound(id))?;
        let max = self.settings.max_students_per_course;
        let count = course.students.len();
        Ok(CapacityResponse {
            course_id: id.0,
            count,
            max,
            status: capacity::check(count, max),
        })
    }

    pub fn list_students(&self) -> Vec<StudentDto> {
        self.repo.students().into_iter().map(StudentDto::from).collect()
    }

    pub fn get_student(&self, id: u64) -> Result<StudentDto, DomainError> {
        let id = StudentId(id);
        self.repo
            .student(id)
            .map(StudentDto::from)
            .ok_or(DomainError::StudentNotFound(id))
    }

    pub fn create_student(&self, req: CreateStudentRequest) -> Result<StudentDto, DomainError> {
        let name = validate_name(req.name)?;
        let student = self.repo.insert_student(NewStudent {
            name,
            birth_date: req.birth_date,
        });
        info!(id = %student.id, name = %student.name, "created student");
        Ok(student.into())
    }

    pub fn delete_student(&self, id: u64) -> Result<(), DomainError> {
        let id = StudentId(id);
        self.repo.delete_student(id)?;
        info!(%id, "deleted student");
        Ok(())
    }

    fn validate_students(&self, ids: Vec<StudentId>) -> Result<Vec<StudentId>, DomainError> {
        let ids = dedup_students(ids);
        let max = self.settings.max_students_per_course;
        if capacity::check(ids.len(), max) == capacity::CapacityStatus::Exceeded {
            return Err(DomainError::CapacityExceeded {
                count: ids.len(),
                max,
            });
        }
        Ok(ids)
    }
}

fn validate_name(name: String) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidField {
            field: "name",
            reason: "must not be blank".to_string(),
        });
    }
    Ok(trimmed.to_string())
}
