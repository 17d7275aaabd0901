//! Authorized HTTP wrapper shared by the Slides and Drive clients.
//!
//! Adds the bearer token to every request and performs exactly one
//! refresh-and-retry when a service answers 401. Everything else maps to
//! [`ApiError`] and is terminal.

use crate::api::ApiError;
use crate::auth::Authenticator;
use reqwest::blocking::Response;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Blocking JSON client with token injection.
///
/// Cloning is cheap and shares the underlying connection pool and the
/// credential provider; the program is single-threaded, so the shared
/// authenticator lives behind `Rc<RefCell>`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    auth: Rc<RefCell<Authenticator>>,
}

impl ApiClient {
    /// Wrap a credential provider.
    pub fn new(auth: Authenticator) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            auth: Rc::new(RefCell::new(auth)),
        }
    }

    /// Issue one authorized JSON request and parse the JSON response.
    pub(crate) fn send(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let token = self.auth.borrow_mut().access_token()?;
        let mut response = self.dispatch(method.clone(), url, query, body, &token)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!(url, "Received 401; refreshing access token and retrying once");
            let token = self.auth.borrow_mut().force_refresh()?;
            response = self.dispatch(method, url, query, body, &token)?;
        }

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        response.json().map_err(|e| ApiError::MalformedResponse {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    fn dispatch(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        token: &str,
    ) -> Result<Response, reqwest::Error> {
        let mut request = self.http.request(method, url).bearer_auth(token);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Authenticator, StoredToken, TokenStore};
    use chrono::{Duration, Utc};
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::path::Path;
    use std::thread;

    struct Received {
        path: String,
        bearer: Option<String>,
        body: String,
    }

    fn read_request(stream: &TcpStream) -> Received {
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line).expect("request line");
        let path = line
            .split_whitespace()
            .nth(1)
            .unwrap_or_default()
            .to_string();

        let mut bearer = None;
        let mut content_length = 0usize;
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).expect("header line");
            let header = header.trim_end();
            if header.is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':') {
                let value = value.trim();
                if name.eq_ignore_ascii_case("authorization") {
                    bearer = value.strip_prefix("Bearer ").map(String::from);
                } else if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.parse().unwrap_or(0);
                }
            }
        }

        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).expect("request body");
        Received {
            path,
            bearer,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }

    fn respond(mut stream: &TcpStream, status: &str, body: &str) {
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
    }

    /// Serve one scripted response per incoming connection, recording what
    /// each request carried.
    fn serve(
        listener: TcpListener,
        responses: Vec<(&'static str, &'static str)>,
    ) -> thread::JoinHandle<Vec<Received>> {
        thread::spawn(move || {
            let mut seen = Vec::new();
            for (status, body) in responses {
                let (stream, _) = listener.accept().expect("connection");
                seen.push(read_request(&stream));
                respond(&stream, status, body);
            }
            seen
        })
    }

    fn client_with_cached_token(dir: &Path, token_uri: &str, access: &str) -> ApiClient {
        let credentials = dir.join("credentials.json");
        std::fs::write(
            &credentials,
            format!(
                r#"{{"installed": {{"client_id": "cid", "client_secret": "cs", "token_uri": "{token_uri}"}}}}"#
            ),
        )
        .expect("writable temp dir");

        let token_path = dir.join("token.json");
        TokenStore::new(&token_path)
            .save(&StoredToken {
                access_token: access.to_string(),
                refresh_token: Some("refresh-1".to_string()),
                expiry: Some(Utc::now() + Duration::hours(1)),
            })
            .expect("save token");

        let auth = Authenticator::new(&credentials, &token_path).expect("valid credentials");
        ApiClient::new(auth)
    }

    #[test]
    fn a_401_triggers_one_refresh_and_retry_with_the_new_token() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("ephemeral port");
        let port = listener.local_addr().expect("local addr").port();
        let base = format!("http://127.0.0.1:{port}");

        let dir = std::env::temp_dir().join("json2slides_test_http_retry");
        let _ = std::fs::remove_dir_all(&dir);
        let _ = std::fs::create_dir_all(&dir);
        let api = client_with_cached_token(&dir, &format!("{base}/token"), "stale-token");

        let server = serve(
            listener,
            vec![
                ("401 Unauthorized", r#"{"error": "invalid_token"}"#),
                ("200 OK", r#"{"access_token": "minted-token", "expires_in": 3600}"#),
                ("200 OK", r#"{"ok": true}"#),
            ],
        );

        let value = api
            .send(Method::GET, &format!("{base}/resource"), &[], None)
            .expect("retry after refresh succeeds");
        assert_eq!(value, serde_json::json!({"ok": true}));

        let seen = server.join().expect("server thread");
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].path, "/resource");
        assert_eq!(seen[0].bearer.as_deref(), Some("stale-token"));
        assert_eq!(seen[1].path, "/token");
        assert!(seen[1].body.contains("grant_type=refresh_token"));
        assert_eq!(seen[2].path, "/resource");
        assert_eq!(
            seen[2].bearer.as_deref(),
            Some("minted-token"),
            "Retry presents the refreshed token"
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn a_second_401_surfaces_without_further_retries() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("ephemeral port");
        let port = listener.local_addr().expect("local addr").port();
        let base = format!("http://127.0.0.1:{port}");

        let dir = std::env::temp_dir().join("json2slides_test_http_retry_fail");
        let _ = std::fs::remove_dir_all(&dir);
        let _ = std::fs::create_dir_all(&dir);
        let api = client_with_cached_token(&dir, &format!("{base}/token"), "stale-token");

        let server = serve(
            listener,
            vec![
                ("401 Unauthorized", r#"{"error": "invalid_token"}"#),
                ("200 OK", r#"{"access_token": "minted-token", "expires_in": 3600}"#),
                ("401 Unauthorized", r#"{"error": "still_invalid"}"#),
            ],
        );

        let result = api.send(Method::GET, &format!("{base}/resource"), &[], None);
        match result {
            Err(ApiError::Status { status, .. }) => assert_eq!(status, 401),
            other => panic!("Expected Status error, got {other:?}"),
        }

        let seen = server.join().expect("server thread");
        assert_eq!(seen.len(), 3, "Exactly one retry, then the error surfaces");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn fresh_cached_token_is_used_without_refreshing() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("ephemeral port");
        let port = listener.local_addr().expect("local addr").port();
        let base = format!("http://127.0.0.1:{port}");

        let dir = std::env::temp_dir().join("json2slides_test_http_fresh");
        let _ = std::fs::remove_dir_all(&dir);
        let _ = std::fs::create_dir_all(&dir);
        let api = client_with_cached_token(&dir, &format!("{base}/token"), "fresh-token");

        let server = serve(listener, vec![("200 OK", r#"{"ok": true}"#)]);

        api.send(Method::GET, &format!("{base}/resource"), &[], None)
            .expect("request succeeds");

        let seen = server.join().expect("server thread");
        assert_eq!(seen.len(), 1, "No token endpoint traffic");
        assert_eq!(seen[0].bearer.as_deref(), Some("fresh-token"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
