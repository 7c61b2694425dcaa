//! Bearer-token helpers for integration tests.
//!
//! `MockAuth` signs a real access token with the test secret so requests pass
//! through the same gate production traffic does.

use axum::http::{HeaderMap, HeaderName, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use clinic_auth_types::token::issue_access_token;

/// Secret shared by test servers and `MockAuth`.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub secret: String,
    pub ttl_secs: u64,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            secret: TEST_JWT_SECRET.to_owned(),
            ttl_secs: 3600,
        }
    }

    /// Sign with a different secret, e.g. to exercise signature rejection.
    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = secret.to_owned();
        self
    }

    pub fn token(&self) -> String {
        issue_access_token(self.user_id, &self.secret, self.ttl_secs)
            .expect("sign test token")
            .0
    }

    /// `Authorization` header pair, ready for `add_header`.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        bearer_header(&self.token())
    }

    pub fn headers(&self) -> HeaderMap {
        let (name, value) = self.header();
        let mut map = HeaderMap::new();
        map.insert(name, value);
        map
    }
}

/// `Authorization: Bearer <token>` for an already issued token.
pub fn bearer_header(token: &str) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header value"),
    )
}
