use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::SessionClaims;
use crate::error::AppError;

/// HS256 keys derived from the configured secret; used to sign the session
/// cookie.
#[derive(Clone)]
pub struct SessionKeys {
    pub enc: EncodingKey,
    pub dec: DecodingKey,
}

impl SessionKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret),
            dec: DecodingKey::from_secret(secret),
        }
    }
}

pub fn now_unix() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as usize)
        .unwrap_or(0)
}

pub fn make_session_claims(user_id: i32, session_token: &str, ttl_secs: usize) -> SessionClaims {
    let iat = now_unix();
    SessionClaims {
        sub: user_id.to_string(),
        sid: session_token.to_string(),
        iat,
        exp: iat + ttl_secs,
    }
}

pub fn encode_token(keys: &SessionKeys, claims: &SessionClaims) -> Result<String, AppError> {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".into());

    encode(&header, claims, &keys.enc)
        .map_err(|err| AppError::internal(format!("Token encoding failed: {err}")))
}

pub fn decode_token(keys: &SessionKeys, token: &str) -> Result<SessionClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<SessionClaims>(token, &keys.dec, &validation)?;
    Ok(data.claims)
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::unauthorized(format!("Invalid or expired session: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionKeys, decode_token, encode_token, make_session_claims, now_unix};
    use crate::{auth::SessionClaims, error::AppError};

    #[test]
    fn makes_claims_with_expected_subject_and_ttl() {
        let claims = make_session_claims(7, "session-token", 60);

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.sid, "session-token");
        assert_eq!(claims.exp.saturating_sub(claims.iat), 60);
    }

    #[test]
    fn token_round_trips_with_same_secret() {
        let keys = SessionKeys::from_secret(b"unit-test-secret-key");
        let claims = make_session_claims(3, "sid-1", 600);
        let token = encode_token(&keys, &claims).expect("token should encode");

        let decoded = decode_token(&keys, &token).expect("token should decode");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let claims = make_session_claims(3, "sid-1", 600);
        let token = encode_token(&SessionKeys::from_secret(b"first-secret-key!"), &claims)
            .expect("token should encode");

        let err = decode_token(&SessionKeys::from_secret(b"second-secret-key"), &token)
            .expect_err("foreign signature should fail");
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = SessionKeys::from_secret(b"unit-test-secret-key");
        let claims = SessionClaims {
            sub: "1".to_string(),
            sid: "sid".to_string(),
            iat: 1,
            exp: now_unix().saturating_sub(3600),
        };
        let token = encode_token(&keys, &claims).expect("token should encode");

        assert!(decode_token(&keys, &token).is_err());
    }
}
