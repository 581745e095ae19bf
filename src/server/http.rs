use crate::app::dto::*;
use crate::app::service::CourseService;
use crate::domain::error::DomainError;
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub const API_PREFIX: &str = "/api/v1";

#[derive(Clone)]
pub struct HttpState {
    pub service: CourseService,
}

#[derive(Debug, Clone, serde::Serialize)]
struct ApiErrorBody {
    error: String,
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ApiErrorBody { error: msg.into() })).into_response()
}

fn domain_error(e: DomainError) -> Response {
    let status = if e.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    if status == StatusCode::BAD_REQUEST {
        warn!(error = %e, "rejected request");
    }
    api_error(status, e.to_string())
}

fn respond<T: serde::Serialize>(status: StatusCode, res: Result<T, DomainError>) -> Response {
    match res {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => domain_error(e),
    }
}

fn no_content(res: Result<(), DomainError>) -> Response {
    match res {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error(e),
    }
}

pub fn build_router(service: CourseService) -> Router {
    let state = Arc::new(HttpState { service });

    let api = Router::new()
        .route("/courses/", get(list_courses).post(create_course))
        .route(
            "/courses/{id}/",
            get(get_course)
                .put(replace_course)
                .patch(patch_course)
                .delete(delete_course),
        )
        .route("/courses/{id}/capacity/", get(course_capacity))
        .route("/students/", get(list_students).post(create_student))
        .route("/students/{id}/", get(get_student).delete(delete_student))
        .route("/schema/", get(schema));

    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(service: CourseService, addr: SocketAddr) -> Result<()> {
    let app = build_router(service);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(state.service.health())
}

async fn schema() -> impl IntoResponse {
    let course = schemars::schema_for!(CourseDto);
    let student = schemars::schema_for!(StudentDto);
    let capacity = schemars::schema_for!(CapacityResponse);
    Json(serde_json::json!({
        "course": course,
        "student": student,
        "capacity": capacity,
    }))
}

async fn list_courses(
    State(state): State<Arc<HttpState>>,
    query: Result<Query<CourseListQuery>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(q)) => Json(state.service.list_courses(q)).into_response(),
        Err(rejection) => api_error(rejection.status(), rejection.body_text()),
    }
}

async fn get_course(State(state): State<Arc<HttpState>>, Path(id): Path<u64>) -> Response {
    respond(StatusCode::OK, state.service.get_course(id))
}

async fn create_course(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<CreateCourseRequest>,
) -> Response {
    respond(StatusCode::CREATED, state.service.create_course(req))
}

async fn replace_course(
    State(state): State<Arc<HttpState>>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateCourseRequest>,
) -> Response {
    respond(StatusCode::OK, state.service.replace_course(id, req))
}

async fn patch_course(
    State(state): State<Arc<HttpState>>,
    Path(id): Path<u64>,
    Json(req): Json<PatchCourseRequest>,
) -> Response {
    respond(StatusCode::OK, state.service.patch_course(id, req))
}

async fn delete_course(State(state): State<Arc<HttpState>>, Path(id): Path<u64>) -> Response {
    no_content(state.service.delete_course(id))
}

async fn course_capacity(State(state): State<Arc<HttpState>>, Path(id): Path<u64>) -> Response {
    respond(StatusCode::OK, state.service.capacity(id))
}

async fn list_students(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(state.service.list_students())
}

async fn get_student(State(state): State<Arc<HttpState>>, Path(id): Path<u64>) -> Response {
    respond(StatusCode::OK, state.service.get_student(id))
}

async fn create_student(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<CreateStudentRequest>,
) -> Response {
    respond(StatusCode::CREATED, state.service.create_student(req))
}

async fn delete_student(State(state): State<Arc<HttpState>>, Path(id): Path<u64>) -> Response {
    no_content(state.service.delete_student(id))
}
