use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use dispatchdesk_application::{AuthorizationGate, IdentityRepository, RequestContext};
use dispatchdesk_core::{AppError, UserIdentity};
use tower_sessions::Session;
use tracing::debug;

use crate::auth::SESSION_USER_KEY;
use crate::error::ApiResult;
use crate::state::AppState;

/// Resolves the caller and attaches a fresh identity and permission snapshot.
///
/// The session only names the caller; role and approval are reloaded from
/// the identity store so role edits apply on the next request.
pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let session_context = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .map(RequestContext::authenticated)
        .unwrap_or_else(RequestContext::anonymous);
    let session_identity = AuthorizationGate::require_authenticated(&session_context)?;

    let stored_context = match state
        .identity_repository
        .find_identity(session_identity.tenant_id(), session_identity.subject())
        .await?
    {
        Some(identity) => RequestContext::authenticated(identity),
        None => {
            debug!(
                subject = session_identity.subject(),
                "session identity no longer exists"
            );
            RequestContext::anonymous()
        }
    };
    let identity = AuthorizationGate::require_authenticated(&stored_context)?.clone();

    let snapshot = state
        .authorization_service
        .evaluator()
        .snapshot(&identity)
        .await?;

    request.extensions_mut().insert(identity);
    request.extensions_mut().insert(snapshot);
    Ok(next.run(request).await)
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site")
            && fetch_site == HeaderValue::from_static("cross-site")
        {
            return Err(AppError::Unauthorized("cross-site request blocked".to_owned()).into());
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if !is_allowed_origin(origin, referer, state.frontend_url.as_str()) {
            return Err(AppError::Unauthorized("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

fn is_allowed_origin(origin: &str, referer: &str, allowed_origin: &str) -> bool {
    if origin == allowed_origin {
        return true;
    }

    referer
        .strip_prefix(allowed_origin)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
