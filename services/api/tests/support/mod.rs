//! Shared harness: the full router over an in-process store
#![allow(dead_code)]

use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use staffdesk_api::{
    AppState,
    domain::Policy,
    middleware::{Claims, JwtConfig, SigningKey, TokenType, TokenVerifier},
    models::{Role, User},
    repositories::MemoryStore,
    routes::create_router,
};

pub const SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_policy(Policy::default())
    }

    pub fn with_policy(policy: Policy) -> Self {
        let store = Arc::new(MemoryStore::new());
        let verifier = TokenVerifier::new(&JwtConfig {
            key: SigningKey::Secret(SECRET.to_string()),
            leeway: 0,
        })
        .unwrap();
        let router = create_router(AppState::new(store.clone(), verifier, policy));
        Self { store, router }
    }

    pub async fn admin(&self) -> (User, String) {
        let user = self
            .store
            .insert_user(User::new("Root", "root@example.com", Role::Admin))
            .await;
        let token = access_token(&user);
        (user, token)
    }

    pub async fn employee(&self, name: &str, salary: Option<&str>) -> (User, String) {
        let mut user = User::new(name, format!("{}@example.com", name.to_lowercase()), Role::Employee);
        user.salary = salary.map(|s| s.parse().unwrap());
        let user = self.store.insert_user(user).await;
        let token = access_token(&user);
        (user, token)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }
}

fn now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs()
}

pub fn token(sub: Uuid, role: Role, token_type: TokenType, exp: u64) -> String {
    let claims = Claims {
        sub,
        role,
        iat: now(),
        exp,
        token_type,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn access_token(user: &User) -> String {
    token(user.id, user.role, TokenType::Access, now() + 900)
}

pub fn refresh_token(user: &User) -> String {
    token(user.id, user.role, TokenType::Refresh, now() + 900)
}

pub fn expired_token(user: &User) -> String {
    token(user.id, user.role, TokenType::Access, now() - 900)
}
