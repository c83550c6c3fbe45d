// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{answer, command, course, execution, question, quiz, student},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (courses, executions, questions, quizzes, students, commands).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (database pool, config, command channel).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:8080"),
        HeaderValue::from_static("http://127.0.0.1:8080"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let course_routes = Router::new()
        .route("/", get(course::list_courses).post(course::create_course))
        .route("/{id}", get(course::get_course).delete(course::delete_course))
        .route(
            "/{id}/topics",
            get(course::list_topics).post(course::create_topic),
        )
        .route("/{id}/executions", post(course::create_execution))
        .route(
            "/{id}/questions",
            get(question::list_questions).post(question::create_question),
        );

    let question_routes = Router::new()
        .route(
            "/{id}",
            get(question::get_question).delete(question::delete_question),
        )
        .route("/{id}/status", put(question::update_question_status));

    let execution_routes = Router::new()
        .route("/", get(execution::list_executions))
        .route("/external", post(execution::create_external_execution))
        .route(
            "/{id}",
            get(execution::get_execution).delete(execution::delete_execution),
        )
        .route(
            "/{id}/students",
            get(execution::list_students).post(execution::enroll_student),
        )
        .route("/{id}/activate", post(execution::activate_execution))
        .route("/{id}/deactivate", post(execution::deactivate_execution))
        .route("/{id}/anonymize", post(execution::anonymize_students))
        .route("/{id}/topics/available", get(execution::available_topics))
        .route(
            "/{id}/quizzes",
            get(quiz::list_quizzes).post(quiz::create_quiz),
        )
        .route("/{id}/quizzes/generate", post(quiz::generate_quiz));

    let quiz_routes = Router::new()
        .route(
            "/{id}",
            get(quiz::get_quiz)
                .put(quiz::update_quiz)
                .delete(quiz::delete_quiz),
        )
        .route(
            "/{id}/answers",
            get(answer::list_answers).post(answer::submit_answers),
        );

    let student_routes =
        Router::new().route("/", get(student::list_students).post(student::create_student));

    let command_routes = Router::new().route("/quiz", post(command::receive_quiz_command));

    Router::new()
        .nest("/api/courses", course_routes)
        .nest("/api/questions", question_routes)
        .nest("/api/executions", execution_routes)
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/students", student_routes)
        .nest("/api/commands", command_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
