use serde::{Deserialize, Serialize};

/// Claims carried by the signed session cookie.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub sub: String, // user id
    pub sid: String, // server-side session token
    pub exp: usize,
    pub iat: usize,
}

impl SessionClaims {
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

/// The authenticated user behind a request, resolved from a live session.
/// Every per-user operation takes this (or its `id`) explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub session_token: String,
}

#[cfg(test)]
mod tests {
    use super::SessionClaims;

    #[test]
    fn user_id_parses_numeric_subject() {
        let claims = SessionClaims {
            sub: "42".to_string(),
            sid: "abc".to_string(),
            exp: 10,
            iat: 1,
        };
        assert_eq!(claims.user_id(), Some(42));

        let bogus = SessionClaims {
            sub: "alice".to_string(),
            ..claims
        };
        assert_eq!(bogus.user_id(), None);
    }
}
