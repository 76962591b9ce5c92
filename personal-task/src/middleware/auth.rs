// personal-task/src/middleware/auth.rs

use crate::config::AppConfig;
use crate::error::AppError;
use crate::logging::RequestContext;
use crate::utils::jwt::JwtManager;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;
use uuid::Uuid;

/// 認証済みユーザー情報を格納するエクステンション
///
/// `user_id` はレポートの所有者スコープとしてそのまま使われる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}

/// Bearer トークンを検証し、`AuthenticatedUser` をリクエストに添付する
pub async fn jwt_auth_middleware(
    State(jwt_manager): State<Arc<JwtManager>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let token = extract_token(&headers).ok_or_else(|| {
        warn!(path = %path, "Missing authentication token");
        AppError::Unauthorized("Authentication required".to_string())
    })?;

    let user_id = jwt_manager
        .verify_access_token(token)
        .and_then(|claims| claims.owner_id())
        .map_err(|e| {
            warn!(path = %path, error = %e, "Invalid access token");
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

    // ログ用のコンテキストにユーザーIDを反映
    if let Some(context) = request.extensions_mut().get_mut::<RequestContext>() {
        context.user_id = Some(user_id);
    }
    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// CORS ミドルウェア設定
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

// --- Axum Extractors ---

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}
