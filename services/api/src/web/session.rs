//! services/api/src/web/session.rs
//!
//! Cookie plumbing for the login session and the one-shot flash messages
//! shown after a redirect.

use axum::http::{header, HeaderMap};

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

/// Finds the value of cookie `name` in the request headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|c| c.trim().strip_prefix(name)?.strip_prefix('='))
}

fn cookie(name: &str, value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        name, value, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn session_cookie(session_id: &str, max_age: i64, secure: bool) -> String {
    cookie(SESSION_COOKIE, session_id, max_age, secure)
}

pub fn clear_session_cookie(secure: bool) -> String {
    cookie(SESSION_COOKIE, "", 0, secure)
}

//=========================================================================================
// Flash Messages
//=========================================================================================

/// A message queued for the next page a redirect lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    LoggedIn,
    LoggedOut,
    LoginRequired,
    Registered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// A message rendered at the top of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: &'static str,
}

impl Notice {
    pub fn error(text: &'static str) -> Self {
        Self {
            kind: NoticeKind::Error,
            text,
        }
    }

    pub fn success(text: &'static str) -> Self {
        Self {
            kind: NoticeKind::Success,
            text,
        }
    }
}

impl Flash {
    const ALL: [Flash; 4] = [
        Flash::LoggedIn,
        Flash::LoggedOut,
        Flash::LoginRequired,
        Flash::Registered,
    ];

    fn key(self) -> &'static str {
        match self {
            Flash::LoggedIn => "logged_in",
            Flash::LoggedOut => "logged_out",
            Flash::LoginRequired => "login_required",
            Flash::Registered => "registered",
        }
    }

    pub fn notice(self) -> Notice {
        match self {
            Flash::LoggedIn => Notice::success("Login realizado com sucesso!"),
            Flash::LoggedOut => Notice::success("Você foi desconectado."),
            Flash::LoginRequired => {
                Notice::error("Por favor, faça login para acessar esta página.")
            }
            Flash::Registered => Notice::success("Cadastro realizado com sucesso! Faça login."),
        }
    }

    pub fn cookie(self, secure: bool) -> String {
        cookie(FLASH_COOKIE, self.key(), 60, secure)
    }

    pub fn clear_cookie(secure: bool) -> String {
        cookie(FLASH_COOKIE, "", 0, secure)
    }

    /// Reads the pending flash from the request, ignoring unknown keys.
    pub fn from_headers(headers: &HeaderMap) -> Option<Flash> {
        let key = read_cookie(headers, FLASH_COOKIE)?;
        Flash::ALL.into_iter().find(|f| f.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn reads_named_cookie_among_others() {
        let h = headers("theme=dark; session=abc-123; flash=logged_out");
        assert_eq!(read_cookie(&h, SESSION_COOKIE), Some("abc-123"));
        assert_eq!(read_cookie(&h, "missing"), None);
    }

    #[test]
    fn cookie_name_must_match_exactly() {
        let h = headers("sessionx=1");
        assert_eq!(read_cookie(&h, SESSION_COOKIE), None);
    }

    #[test]
    fn flash_survives_the_cookie_round_trip() {
        for flash in Flash::ALL {
            let set = flash.cookie(false);
            let value = set.split(';').next().unwrap();
            assert_eq!(Flash::from_headers(&headers(value)), Some(flash));
        }
        assert_eq!(Flash::from_headers(&headers("flash=bogus")), None);
    }

    #[test]
    fn secure_flag_is_optional() {
        assert!(session_cookie("id", 10, true).ends_with("; Secure"));
        assert!(!session_cookie("id", 10, false).contains("Secure"));
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }
}
