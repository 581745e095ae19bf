//! Per-test application and entity factories.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use course_api::app::dto::{CourseDto, CreateCourseRequest, CreateStudentRequest, StudentDto};
use course_api::app::service::CourseService;
use course_api::config::Settings;
use serde_json::Value;
use tower::ServiceExt;

/// A fresh application with an empty store. Nothing is shared between instances.
pub struct TestApp {
    pub service: CourseService,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_max_students(max: usize) -> Self {
        Self::with_settings(Settings {
            max_students_per_course: max,
            ..Settings::default()
        })
    }

    pub fn with_settings(settings: Settings) -> Self {
        let service = CourseService::in_memory(settings);
        let router = course_api::server::http::build_router(service.clone());
        Self { service, router }
    }

    pub fn students_limit(&self) -> usize {
        self.service.settings().max_students_per_course
    }

    pub fn course_factory(&self) -> CourseFactory<'_> {
        CourseFactory::new(&self.service)
    }

    pub fn student_factory(&self) -> StudentFactory<'_> {
        StudentFactory::new(&self.service)
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let res = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn patch_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PATCH", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, None).await
    }
}

fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}

/// Builds and persists courses. Unset fields get generated values.
pub struct CourseFactory<'a> {
    service: &'a CourseService,
    name: Option<String>,
    students: Vec<u64>,
}

impl<'a> CourseFactory<'a> {
    pub fn new(service: &'a CourseService) -> Self {
        Self {
            service,
            name: None,
            students: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn students(mut self, students: &[StudentDto]) -> Self {
        self.students = students.iter().map(|s| s.id).collect();
        self
    }

    pub fn create(self) -> CourseDto {
        self.service
            .create_course(CreateCourseRequest {
                name: self.name.unwrap_or_else(|| unique_name("course")),
                students: self.students,
            })
            .expect("factory course is valid")
    }

    /// Create `n` courses sharing the overrides; names stay unique unless set.
    pub fn create_many(self, n: usize) -> Vec<CourseDto> {
        (0..n)
            .map(|_| {
                CourseFactory {
                    service: self.service,
                    name: self.name.clone(),
                    students: self.students.clone(),
                }
                .create()
            })
            .collect()
    }
}

/// Builds and persists students. Unset fields get generated values.
pub struct StudentFactory<'a> {
    service: &'a CourseService,
    name: Option<String>,
    birth_date: Option<NaiveDate>,
}

impl<'a> StudentFactory<'a> {
    pub fn new(service: &'a CourseService) -> Self {
        Self {
            service,
            name: None,
            birth_date: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    pub fn create(self) -> StudentDto {
        self.service
            .create_student(CreateStudentRequest {
                name: self.name.unwrap_or_else(|| unique_name("student")),
                birth_date: self.birth_date,
            })
            .expect("factory student is valid")
    }

    pub fn create_many(self, n: usize) -> Vec<StudentDto> {
        (0..n)
            .map(|_| {
                StudentFactory {
                    service: self.service,
                    name: self.name.clone(),
                    birth_date: self.birth_date,
                }
                .create()
            })
            .collect()
    }
}
