//! Route definitions for the CourseHub HTTP API.
//!
//! Routes are grouped by resource and receive `AppState` through Axum's
//! `State` extractor.

use axum::Router;
use axum::routing::{get, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route, without middleware or state.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(account_routes())
        .merge(profile_routes())
        .merge(role_routes())
        .merge(academic_year_routes())
        .merge(node_routes())
        .merge(ue_routes())
        .merge(course_routes())
        .merge(affectation_routes())
        .route("/health", get(handlers::health::health))
}

/// Login, logout, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

fn account_routes() -> Router<AppState> {
    use handlers::account::*;
    Router::new()
        .route("/account", get(list_accounts).post(create_account))
        .route(
            "/account/{id}",
            get(get_account).patch(update_account).delete(delete_account),
        )
        .route("/account/{id}/role", put(set_role))
}

fn profile_routes() -> Router<AppState> {
    use handlers::profile::*;
    Router::new()
        .route("/profile", get(list_profiles).post(create_profile))
        .route(
            "/profile/{id}",
            get(get_profile).patch(update_profile).delete(delete_profile),
        )
        .route("/profile/{id}/account", put(link_account))
        .route("/profile/{id}/affectation", get(list_affectations))
}

/// Roles and the permission catalogue
fn role_routes() -> Router<AppState> {
    use handlers::role::*;
    Router::new()
        .route("/role", get(list_roles).post(create_role))
        .route(
            "/role/{id}",
            get(get_role).patch(update_role).delete(delete_role),
        )
        .route("/role/{id}/permissions", put(set_permissions))
        .route("/permission", get(list_permissions))
}

fn academic_year_routes() -> Router<AppState> {
    use handlers::academic_year::*;
    Router::new()
        .route("/academic-year", get(list_years).post(create_year))
        .route("/academic-year/current", get(get_current))
        .route("/academic-year/{year}/current", put(set_current))
}

/// Tree retrieval and hierarchy edits
fn node_routes() -> Router<AppState> {
    use handlers::node::*;
    Router::new()
        .route("/node", post(create_node))
        .route("/node/tree", get(get_tree))
        .route(
            "/node/{id}",
            get(get_node).patch(update_node).delete(delete_node),
        )
        .route("/node/{id}/tree", get(get_subtree))
}

fn ue_routes() -> Router<AppState> {
    use handlers::ue::*;
    Router::new()
        .route("/ue", post(create_ue))
        .route("/ue/{id}", get(get_ue).patch(update_ue).delete(delete_ue))
        .route(
            "/ue/{id}/course/{course_id}",
            put(attach_course).delete(detach_course),
        )
}

/// Courses and course types
fn course_routes() -> Router<AppState> {
    use handlers::course::*;
    Router::new()
        .route("/course", get(list_courses).post(create_course))
        .route(
            "/course/{id}",
            get(get_course).patch(update_course).delete(delete_course),
        )
        .route("/course/{id}/affectation", get(list_affectations))
        .route("/course-type", get(list_course_types).post(create_course_type))
        .route(
            "/course-type/{id}",
            axum::routing::patch(update_course_type).delete(delete_course_type),
        )
}

fn affectation_routes() -> Router<AppState> {
    use handlers::affectation::*;
    Router::new()
        .route("/affectation", post(create_affectation))
        .route(
            "/affectation/{id}",
            axum::routing::patch(update_hours).delete(delete_affectation),
        )
}
