use crate::core::application::{Application, ApplicationServices};
use crate::domain::schedule::ScheduleService;
use crate::inbound::http::handlers::{
    assign_dates, bulk_dates, list_assignments, query_compliance, remove_dates, server_health,
};
use crate::inbound::http::middleware::{COMPANY_HEADER, ROLE_HEADER, USER_HEADER, principal};
use axum::Router;
use axum::extract::{MatchedPath, Request};
use axum::middleware::from_fn;
use axum::routing::{delete, get, post, put};
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE, ORIGIN};
use http::{HeaderName, HeaderValue, Method, StatusCode};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn router<SCHEDULE: ScheduleService + Send + Sync + 'static>(
    application: Application<SCHEDULE>,
) -> Router {
    let config = application.config();

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec![
            ORIGIN,
            ACCEPT,
            CONTENT_TYPE,
            HeaderName::from_static(USER_HEADER),
            HeaderName::from_static(ROLE_HEADER),
            HeaderName::from_static(COMPANY_HEADER),
        ])
        .allow_origin(cors_origins(&config.cors_hosts))
        .allow_credentials(true);

    Router::new()
        .route("/healthz", get(server_health))
        .nest("/api", api_routes::<Application<SCHEDULE>>())
        .layer(cors)
        .layer((
            SetSensitiveHeadersLayer::new([AUTHORIZATION, COOKIE]),
            CompressionLayer::new(),
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request| {
                    let method = req.method();
                    let uri = req.uri();

                    let matched_path = req
                        .extensions()
                        .get::<MatchedPath>()
                        .map(|matched_path| matched_path.as_str());

                    tracing::debug_span!("request", %method, %uri, matched_path)
                })
                .on_failure(()),
            TimeoutLayer::with_status_code(
                StatusCode::GATEWAY_TIMEOUT,
                std::time::Duration::from_secs(30),
            ),
            CatchPanicLayer::new(),
        ))
        .with_state(application)
}

fn api_routes<APP>() -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/assignments",
            put(assign_dates::<APP>).get(list_assignments::<APP>),
        )
        .route("/assignments/bulk", post(bulk_dates::<APP>))
        .route(
            "/assignments/{level}/{item_id}/{company_id}",
            delete(remove_dates::<APP>),
        )
        .route("/compliance", get(query_compliance::<APP>))
        .route_layer(from_fn(principal))
}

fn cors_origins(hosts: &[String]) -> Vec<HeaderValue> {
    hosts
        .iter()
        .filter_map(|host| match host.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(host = %host, "ignoring invalid cors host");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::cors_origins;
    use crate::core::config::Config;

    #[test]
    fn test_default_config_has_no_cors_hosts() {
        let config = Config::default();
        assert!(cors_origins(&config.cors_hosts).is_empty());
    }

    #[test]
    fn test_invalid_cors_hosts_skipped() {
        let hosts = vec![
            "https://planner.example.com".to_string(),
            "bad\nhost".to_string(),
        ];

        let origins = cors_origins(&hosts);

        assert_eq!(1, origins.len());
        assert_eq!(origins[0], "https://planner.example.com");
    }
}
