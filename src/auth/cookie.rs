use axum::http::{HeaderMap, HeaderValue, header};

use crate::error::AppError;

pub const SESSION_COOKIE: &str = "homebase_session";

pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie =
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|err| AppError::internal(format!("Invalid session cookie: {err}")))
}

pub fn cleared_session_cookie() -> HeaderValue {
    HeaderValue::from_static("homebase_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Value of cookie `name` from the request's `Cookie` headers, if any.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::{SESSION_COOKIE, cleared_session_cookie, read_cookie, session_cookie};

    #[test]
    fn builds_http_only_cookie() {
        let value = session_cookie("abc.def.ghi", 3600, false).expect("cookie should build");
        let text = value.to_str().expect("ascii");

        assert!(text.starts_with("homebase_session=abc.def.ghi;"));
        assert!(text.contains("HttpOnly"));
        assert!(text.contains("Max-Age=3600"));
        assert!(!text.contains("Secure"));

        let secure = session_cookie("t", 1, true).expect("cookie should build");
        assert!(secure.to_str().expect("ascii").ends_with("; Secure"));
    }

    #[test]
    fn reads_named_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("a=1; homebase_session=tok.en; b=2"),
        );

        assert_eq!(read_cookie(&headers, SESSION_COOKIE), Some("tok.en".to_string()));
        assert_eq!(read_cookie(&headers, "theme"), Some("dark".to_string()));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn cleared_cookie_is_treated_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("homebase_session="));
        assert_eq!(read_cookie(&headers, SESSION_COOKIE), None);
        assert!(
            cleared_session_cookie()
                .to_str()
                .expect("ascii")
                .contains("Max-Age=0")
        );
    }
}
