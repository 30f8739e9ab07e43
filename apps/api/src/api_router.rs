use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use dispatchdesk_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

pub fn build_router<S>(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<S>,
) -> Result<Router, AppError>
where
    S: SessionStore + Clone,
{
    let protected_routes = Router::new()
        .route(
            "/permissions",
            get(handlers::permissions::list_roles_handler),
        )
        .route(
            "/permissions/orphans",
            get(handlers::permissions::list_orphaned_identities_handler),
        )
        .route(
            "/permissions/orphans/reassign",
            post(handlers::permissions::reassign_identities_handler),
        )
        .route(
            "/permissions/roles",
            post(handlers::permissions::create_role_handler),
        )
        .route(
            "/permissions/roles/{role}",
            delete(handlers::permissions::delete_role_handler),
        )
        .route(
            "/permissions/roles/{role}/rename",
            put(handlers::permissions::rename_role_handler),
        )
        .route(
            "/permissions/{role}",
            get(handlers::permissions::get_role_handler)
                .put(handlers::permissions::update_role_permissions_handler),
        )
        .route("/auth/me", get(auth::me_handler))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(session_layer)
        .with_state(app_state))
}
