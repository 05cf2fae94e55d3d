// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post, put},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{
        assignments, auth, courses, modules, notifications, quizzes, students, tasks, teachers,
    },
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * One sub-router per resource.
/// * `/auth/me` sits behind the bearer-token middleware.
/// * Trace and CORS layers apply to everything.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let auth_routes = Router::new().route("/login", post(auth::login)).merge(
        Router::new()
            .route("/me", get(auth::me))
            .layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
    );

    let teacher_routes = Router::new()
        .route("/", get(teachers::list_teachers).post(teachers::create_teacher))
        .route(
            "/{id}",
            get(teachers::get_teacher)
                .put(teachers::update_teacher)
                .delete(teachers::delete_teacher),
        );

    let student_routes = Router::new()
        .route("/", get(students::list_students).post(students::create_student))
        .route(
            "/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .route("/{id}/enroll", post(students::enroll_student))
        .route("/{id}/results", get(students::list_student_results))
        .route("/uniqueId/{unique_id}", get(students::get_student_by_unique_id))
        .route("/course/{course_id}", get(students::list_students_by_course));

    let course_routes = Router::new()
        .route("/", get(courses::list_courses).post(courses::create_course))
        .route(
            "/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/{id}/results", get(courses::course_results))
        .route("/teacher/{teacher_id}", get(courses::list_courses_by_teacher))
        .route("/student/{student_id}", get(courses::list_courses_by_student));

    let module_routes = Router::new()
        .route("/", get(modules::list_modules).post(modules::create_module))
        .route(
            "/{id}",
            get(modules::get_module)
                .put(modules::update_module)
                .delete(modules::delete_module),
        )
        .route("/course/{course_id}", get(modules::list_modules_by_course));

    let quiz_routes = Router::new()
        .route("/", post(quizzes::create_quiz))
        .route(
            "/{id}",
            get(quizzes::get_quiz)
                .put(quizzes::replace_quiz)
                .delete(quizzes::delete_quiz),
        )
        .route("/{id}/take", get(quizzes::take_quiz))
        .route("/{id}/submit", post(quizzes::submit_quiz))
        .route("/{id}/results", get(quizzes::get_quiz_results))
        .route("/{id}/summary", get(quizzes::quiz_summary))
        .route("/module/{module_id}", get(quizzes::list_quizzes_by_module))
        .route("/course/{course_id}", get(quizzes::list_quizzes_by_course))
        .route(
            "/course/{course_id}/student/{student_id}",
            get(quizzes::student_course_scores),
        );

    let assignment_routes = Router::new()
        .route(
            "/",
            get(assignments::list_assignments).post(assignments::create_assignment),
        )
        .route(
            "/{id}",
            get(assignments::get_assignment)
                .put(assignments::update_assignment)
                .delete(assignments::delete_assignment),
        )
        .route("/module/{module_id}", get(assignments::list_assignments_by_module));

    let task_routes = Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/module/{module_id}", get(tasks::list_tasks_by_module))
        .route("/course/{course_id}", get(tasks::list_tasks_by_course));

    let notification_routes = Router::new()
        .route("/", post(notifications::create_notification))
        .route(
            "/student/{student_id}",
            get(notifications::list_notifications_by_student),
        )
        .route("/{id}/read", put(notifications::mark_notification_read))
        .route(
            "/{id}",
            get(notifications::get_notification).delete(notifications::delete_notification),
        );

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/teachers", teacher_routes)
        .nest("/students", student_routes)
        .nest("/courses", course_routes)
        .nest("/modules", module_routes)
        .nest("/quizzes", quiz_routes)
        .nest("/assignments", assignment_routes)
        .nest("/tasks", task_routes)
        .nest("/notifications", notification_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
