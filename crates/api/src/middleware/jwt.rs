use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Marks a request whose bearer token failed verification.
#[derive(Debug, Clone, Copy)]
pub struct RejectedToken;

/// Attaches the claims of a valid `Bearer` token to the request extensions.
///
/// A missing or failing token leaves the request anonymous, so public routes
/// and login keep working with a stale token attached. Handlers that need an
/// identity ask for `AuthUser`, which answers 401.
pub async fn jwt_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(request.headers()) {
        match state.jwt_service().verify_token(token) {
            Ok(claims) => {
                tracing::debug!(user_id = %claims.sub, role = %claims.role, "authenticated request");
                request.extensions_mut().insert(claims);
            }
            Err(_) => {
                request.extensions_mut().insert(RejectedToken);
            }
        }
    }

    next.run(request).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn only_bearer_scheme_yields_a_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwdw==")), None);
        assert_eq!(bearer_token(&headers("Bearer   ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
