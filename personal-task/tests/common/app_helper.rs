// tests/common/app_helper.rs

use super::memory_store::InMemoryStatsQuery;
use super::test_data::reference_now;
use axum::{
    body::{self, Body},
    http::{header, Request, Response},
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use personal_task::{
    api::{app_router, AppState},
    config::AppConfig,
    service::{clock::FixedClock, stats_service::StatsService},
    utils::jwt::{AccessTokenClaims, JwtManager},
};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// インメモリのストアと固定時刻でアプリを構築
pub fn setup_app(store: InMemoryStatsQuery) -> Router {
    let config = AppConfig::for_testing();
    let jwt_manager = Arc::new(JwtManager::new(&config.jwt_secret).unwrap());
    let app_state = AppState::new(
        Arc::new(StatsService::new(Arc::new(store))),
        jwt_manager,
        Arc::new(FixedClock(reference_now())),
        Arc::new(config),
    );
    app_router(app_state)
}

/// テスト用設定の秘密鍵で署名したアクセストークン
pub fn token_for(owner: Uuid) -> String {
    let now = Utc::now();
    let claims = AccessTokenClaims {
        sub: owner.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(15)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(AppConfig::for_testing().jwt_secret.as_bytes()),
    )
    .unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
