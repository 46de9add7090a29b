use crate::domain::principal::{Principal, Role};
use crate::errors::AppError;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use http::HeaderMap;
use uuid::Uuid;

pub const USER_HEADER: &str = "x-user-id";
pub const ROLE_HEADER: &str = "x-user-role";
pub const COMPANY_HEADER: &str = "x-company-id";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn principal_from_headers(headers: &HeaderMap) -> Result<Principal, AppError> {
    let user_id = header(headers, USER_HEADER).ok_or(AppError::Unauthorized(None))?;
    let role: Role = header(headers, ROLE_HEADER)
        .ok_or(AppError::Unauthorized(None))?
        .parse()?;
    let company_id = header(headers, COMPANY_HEADER)
        .map(Uuid::parse_str)
        .transpose()
        .map_err(|_| AppError::Unauthorized(Some("invalid company id".to_string())))?;

    Ok(Principal::new(user_id.to_string(), role, company_id)?)
}

/// Resolves the caller forwarded by the authenticating gateway and stores it
/// as a request extension.
pub async fn principal(mut req: Request, next: Next) -> Result<Response, AppError> {
    let principal = principal_from_headers(req.headers())?;
    tracing::debug!(user_id = %principal.user_id, role = ?principal.role, "resolved principal");

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use crate::domain::principal::Principal;
    use crate::inbound::http::middleware::{COMPANY_HEADER, ROLE_HEADER, USER_HEADER, principal};
    use axum::routing::get;
    use axum::{Extension, Router};
    use axum::middleware::from_fn;
    use axum_test::TestServer;
    use http::{HeaderName, HeaderValue};

    async fn whoami(Extension(principal): Extension<Principal>) -> String {
        principal.user_id
    }

    fn server() -> TestServer {
        let router = Router::new()
            .route("/whoami", get(whoami))
            .route_layer(from_fn(principal));

        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_principal_resolved() {
        let response = server()
            .get("/whoami")
            .add_header(
                HeaderName::from_static(USER_HEADER),
                HeaderValue::from_static("alice"),
            )
            .add_header(
                HeaderName::from_static(ROLE_HEADER),
                HeaderValue::from_static("consultant"),
            )
            .await;

        response.assert_status_ok();
        response.assert_text("alice");
    }

    #[tokio::test]
    async fn test_missing_headers_unauthorized() {
        let response = server().get("/whoami").await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_unknown_role_unauthorized() {
        let response = server()
            .get("/whoami")
            .add_header(
                HeaderName::from_static(USER_HEADER),
                HeaderValue::from_static("alice"),
            )
            .add_header(
                HeaderName::from_static(ROLE_HEADER),
                HeaderValue::from_static("guest"),
            )
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_company_user_without_company_unauthorized() {
        let response = server()
            .get("/whoami")
            .add_header(
                HeaderName::from_static(USER_HEADER),
                HeaderValue::from_static("bob"),
            )
            .add_header(
                HeaderName::from_static(ROLE_HEADER),
                HeaderValue::from_static("company"),
            )
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_malformed_company_unauthorized() {
        let response = server()
            .get("/whoami")
            .add_header(
                HeaderName::from_static(USER_HEADER),
                HeaderValue::from_static("bob"),
            )
            .add_header(
                HeaderName::from_static(ROLE_HEADER),
                HeaderValue::from_static("company"),
            )
            .add_header(
                HeaderName::from_static(COMPANY_HEADER),
                HeaderValue::from_static("not-a-uuid"),
            )
            .await;

        response.assert_status_unauthorized();
    }
}
