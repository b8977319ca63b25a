//! JSON HTTP API for the age calculator.

use crate::age::{compute_age, render_age_summary, AgeBreakdown, FormattedAgeBreakdown};
use crate::clock::Clock;
use crate::config::Config;
use crate::i18n::{
    is_indonesian_user, locale_from_pathname, match_accept_language, parse_accept_language, Locale,
    LocaleError,
};
use crate::validation::{validate, AgeInput, ValidationErrors};
use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{header::ACCEPT_LANGUAGE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: Arc::new(config),
            clock,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{errors}")]
    Validation {
        errors: ValidationErrors,
        locale: Locale,
    },

    #[error(transparent)]
    UnsupportedLocale(#[from] LocaleError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { errors, locale } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({
                    "locale": locale,
                    "errors": errors.messages(locale),
                })),
            )
                .into_response(),
            ApiError::UnsupportedLocale(e) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response(),
        }
    }
}

/// Age request fields, from a query string or a JSON body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeRequest {
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub birth_time: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Overrides Accept-Language negotiation when set
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeResponse {
    pub locale: Locale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub birth: String,
    pub evaluated_at: String,
    pub age: AgeBreakdown,
    pub formatted: FormattedAgeBreakdown,
    pub summary: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocaleQuery {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleResponse {
    pub locale: Locale,
    /// BCP 47 tag of the formatting conventions (e.g., "id-ID")
    pub tag: &'static str,
    pub native_name: &'static str,
    /// "path", "accept-language" or "default"
    pub source: &'static str,
    pub indonesian_user: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/age", get(age_from_query).post(age_from_json))
        .route("/api/locale", get(detect_locale))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C / SIGTERM.
pub async fn serve(state: AppState) -> Result<()> {
    let address = state.config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("✓ Listening on {}", address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn age_from_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(request): Query<AgeRequest>,
) -> Result<Json<AgeResponse>, ApiError> {
    calculate(&state, &headers, request).map(Json)
}

pub async fn age_from_json(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AgeRequest>,
) -> Result<Json<AgeResponse>, ApiError> {
    calculate(&state, &headers, request).map(Json)
}

pub async fn detect_locale(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LocaleQuery>,
) -> Json<LocaleResponse> {
    let accept_language = accept_language(&headers);

    let path_locale = query.path.as_deref().and_then(locale_from_pathname);
    let (locale, source) = match (path_locale, match_accept_language(accept_language)) {
        (Some(locale), _) => (locale, "path"),
        (None, Some(locale)) => (locale, "accept-language"),
        (None, None) => (state.config.default_locale, "default"),
    };

    Json(LocaleResponse {
        locale,
        tag: locale.tag(),
        native_name: locale.native_name(),
        source,
        indonesian_user: is_indonesian_user(accept_language),
    })
}

/// Validate, compute and format one age request.
pub fn calculate(
    state: &AppState,
    headers: &HeaderMap,
    request: AgeRequest,
) -> Result<AgeResponse, ApiError> {
    let locale = resolve_locale(
        request.locale.as_deref(),
        accept_language(headers),
        state.config.default_locale,
    )?;

    let input = AgeInput {
        birth_date: request.birth_date,
        birth_time: request.birth_time,
        name: request.name,
    };

    let now = state.clock.now();
    let validated = validate(&input, state.config.utc_offset(), now).map_err(|errors| {
        info!("Rejected age request: {}", errors);
        ApiError::Validation { errors, locale }
    })?;

    let now = now.with_timezone(&state.config.utc_offset());
    let age = compute_age(&validated.birth, &now);
    let formatted = age.localize(locale);
    let summary = render_age_summary(&formatted, locale, validated.name.as_deref());

    debug!(
        "Computed age for {} in locale {}: {} total days",
        validated.birth, locale, age.total_days
    );

    Ok(AgeResponse {
        locale,
        name: validated.name,
        birth: validated.birth.to_rfc3339(),
        evaluated_at: now.to_rfc3339(),
        age,
        formatted,
        summary,
    })
}

/// Explicit locale wins; otherwise negotiate from Accept-Language.
pub fn resolve_locale(
    explicit: Option<&str>,
    accept_language: Option<&str>,
    default: Locale,
) -> Result<Locale, LocaleError> {
    match explicit.map(str::trim).filter(|code| !code.is_empty()) {
        Some(code) => Locale::from_code(code),
        None => Ok(parse_accept_language(accept_language, default)),
    }
}

fn accept_language(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use axum::http::HeaderValue;
    use chrono::{TimeZone, Utc};

    fn test_state(config: Config) -> AppState {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        AppState::new(config, Arc::new(FixedClock::new(now)))
    }

    fn headers_with_language(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn request(birth_date: &str) -> AgeRequest {
        AgeRequest {
            birth_date: birth_date.to_string(),
            ..AgeRequest::default()
        }
    }

    // ==================== Age Endpoint Tests ====================

    #[tokio::test]
    async fn test_age_from_query_default_locale() {
        let state = test_state(Config::default());
        let Json(response) = age_from_query(State(state), HeaderMap::new(), Query(request("2000-01-01")))
            .await
            .unwrap();

        assert_eq!(response.locale, Locale::ENGLISH);
        assert_eq!(response.age.years, 24);
        assert_eq!(response.age.total_days, 8766);
        assert_eq!(response.formatted.total_days, "8,766");
        assert_eq!(response.summary, "You are 24 years, 0 months, 0 days old.");
        assert_eq!(response.birth, "2000-01-01T00:00:00+00:00");
        assert_eq!(response.evaluated_at, "2024-01-01T00:00:00+00:00");
    }

    #[tokio::test]
    async fn test_age_uses_accept_language() {
        let state = test_state(Config::default());
        let headers = headers_with_language("id-ID,id;q=0.9,en-US;q=0.8");
        let Json(response) = age_from_query(State(state), headers, Query(request("2000-01-01")))
            .await
            .unwrap();

        assert_eq!(response.locale, Locale::INDONESIAN);
        assert_eq!(response.formatted.total_days, "8.766");
        assert_eq!(response.summary, "Usia Anda 24 tahun, 0 bulan, 0 hari.");
    }

    #[tokio::test]
    async fn test_explicit_locale_overrides_header() {
        let state = test_state(Config::default());
        let headers = headers_with_language("id-ID");
        let req = AgeRequest {
            locale: Some("en".to_string()),
            name: Some("Sari".to_string()),
            ..request("2000-01-01")
        };
        let Json(response) = age_from_json(State(state), headers, Json(req)).await.unwrap();

        assert_eq!(response.locale, Locale::ENGLISH);
        assert_eq!(response.name.as_deref(), Some("Sari"));
        assert!(response.summary.starts_with("Sari, you are 24 years"));
    }

    #[tokio::test]
    async fn test_age_in_configured_offset() {
        let config = Config {
            utc_offset_minutes: 7 * 60,
            ..Config::default()
        };
        let state = test_state(config);
        let req = AgeRequest {
            birth_time: Some("06:00".to_string()),
            ..request("2023-12-31")
        };
        let response = calculate(&state, &HeaderMap::new(), req).unwrap();

        // now is 2024-01-01T07:00+07:00
        assert_eq!(response.evaluated_at, "2024-01-01T07:00:00+07:00");
        assert_eq!((response.age.days, response.age.hours), (1, 1));
        assert_eq!(response.age.total_hours, 25);
    }

    #[tokio::test]
    async fn test_future_birth_is_unprocessable() {
        let state = test_state(Config::default());
        let err = age_from_query(State(state), HeaderMap::new(), Query(request("2030-01-01")))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation { .. }));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_validation_errors_use_request_locale() {
        let state = test_state(Config::default());
        let req = AgeRequest {
            locale: Some("id".to_string()),
            ..request("bukan tanggal")
        };
        match calculate(&state, &HeaderMap::new(), req) {
            Err(ApiError::Validation { errors, locale }) => {
                assert_eq!(locale, Locale::INDONESIAN);
                assert_eq!(
                    errors.messages(locale),
                    vec!["Silakan masukkan tanggal yang valid."]
                );
            }
            other => panic!("Expected validation error, got {:?}", other.map(|r| r.summary)),
        }
    }

    #[tokio::test]
    async fn test_unknown_locale_is_bad_request() {
        let state = test_state(Config::default());
        let req = AgeRequest {
            locale: Some("fr".to_string()),
            ..request("2000-01-01")
        };
        let err = calculate(&state, &HeaderMap::new(), req).unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_age_response_wire_shape() {
        let state = test_state(Config::default());
        let response = calculate(&state, &HeaderMap::new(), request("2000-01-01")).unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["locale"], "en");
        assert_eq!(json["age"]["totalDays"], 8766);
        assert_eq!(json["formatted"]["totalDays"], "8,766");
        assert!(json.get("name").is_none());
        assert!(json.get("evaluatedAt").is_some());
    }

    // ==================== Locale Endpoint Tests ====================

    #[tokio::test]
    async fn test_detect_locale_from_path() {
        let state = test_state(Config::default());
        let query = LocaleQuery {
            path: Some("/id/about".to_string()),
        };
        let Json(response) =
            detect_locale(State(state), headers_with_language("en-US"), Query(query)).await;
        assert_eq!(response.locale, Locale::INDONESIAN);
        assert_eq!(response.tag, "id-ID");
        assert_eq!(response.source, "path");
        assert!(!response.indonesian_user);
    }

    #[tokio::test]
    async fn test_detect_locale_wire_shape() {
        let state = test_state(Config::default());
        let Json(response) = detect_locale(
            State(state),
            headers_with_language("id-ID,id;q=0.9"),
            Query(LocaleQuery::default()),
        )
        .await;

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["locale"], "id");
        assert_eq!(json["tag"], "id-ID");
        assert_eq!(json["nativeName"], "Bahasa Indonesia");
        assert_eq!(json["source"], "accept-language");
        assert_eq!(json["indonesianUser"], true);
    }

    #[tokio::test]
    async fn test_detect_locale_from_header() {
        let state = test_state(Config::default());
        let Json(response) = detect_locale(
            State(state),
            headers_with_language("id-ID,id;q=0.9"),
            Query(LocaleQuery::default()),
        )
        .await;
        assert_eq!(response.locale, Locale::INDONESIAN);
        assert_eq!(response.source, "accept-language");
        assert!(response.indonesian_user);
    }

    #[tokio::test]
    async fn test_detect_locale_default() {
        let config = Config {
            default_locale: Locale::INDONESIAN,
            ..Config::default()
        };
        let Json(response) = detect_locale(
            State(test_state(config)),
            HeaderMap::new(),
            Query(LocaleQuery::default()),
        )
        .await;
        assert_eq!(response.locale, Locale::INDONESIAN);
        assert_eq!(response.source, "default");
    }

    // ==================== Locale Resolution Tests ====================

    #[test]
    fn test_resolve_locale() {
        assert_eq!(resolve_locale(Some("id"), Some("en"), Locale::ENGLISH), Ok(Locale::INDONESIAN));
        assert_eq!(resolve_locale(Some(" "), Some("id"), Locale::ENGLISH), Ok(Locale::INDONESIAN));
        assert_eq!(resolve_locale(None, None, Locale::INDONESIAN), Ok(Locale::INDONESIAN));
        assert!(resolve_locale(Some("xx"), None, Locale::ENGLISH).is_err());
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }

    #[test]
    fn test_router_builds() {
        let _router = router(test_state(Config::default()));
    }
}
