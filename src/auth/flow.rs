//! OAuth flows: token refresh and the interactive installed-app flow.
//!
//! The interactive flow starts a loopback listener on an ephemeral
//! 127.0.0.1 port, prints the authorization URL for the user to open,
//! receives the redirect carrying the authorization code, and exchanges
//! the code for tokens. Refresh posts the stored refresh token to the
//! token endpoint. Either path persists the result through the
//! [`TokenStore`].

use crate::auth::{AuthError, StoredToken, TokenStore};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::borrow::Cow;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use tracing::{info, warn};

/// Capability scopes required for presentation editing and storage access.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/presentations",
    "https://www.googleapis.com/auth/drive",
];

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth client secrets for an installed application.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecrets {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Authorization endpoint.
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    /// Token endpoint.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// On-disk shape of a Google client secrets file.
#[derive(Debug, Deserialize)]
struct SecretsFile {
    installed: ClientSecrets,
}

impl ClientSecrets {
    /// Load secrets from a `credentials.json` installed-app file.
    pub fn load(path: &Path) -> Result<Self, AuthError> {
        if !path.exists() {
            return Err(AuthError::CredentialsNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents =
            std::fs::read_to_string(path).map_err(|e| AuthError::InvalidCredentials {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let file: SecretsFile =
            serde_json::from_str(&contents).map_err(|e| AuthError::InvalidCredentials {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(file.installed)
    }
}

/// Successful response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Credential provider: loads, refreshes, and persists tokens.
#[derive(Debug)]
pub struct Authenticator {
    secrets: ClientSecrets,
    store: TokenStore,
    http: reqwest::blocking::Client,
    current: Option<StoredToken>,
}

impl Authenticator {
    /// Build a provider from a secrets file and a token cache path.
    ///
    /// Loads any cached token; no network traffic happens until a token
    /// is requested.
    pub fn new(credentials_path: &Path, token_path: &Path) -> Result<Self, AuthError> {
        let secrets = ClientSecrets::load(credentials_path)?;
        let store = TokenStore::new(token_path);
        let current = store.load()?;
        Ok(Self {
            secrets,
            store,
            http: reqwest::blocking::Client::new(),
            current,
        })
    }

    /// A bearer token valid now, refreshing or re-authorizing as needed.
    pub fn access_token(&mut self) -> Result<String, AuthError> {
        if let Some(token) = &self.current {
            if token.is_fresh(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }
        self.force_refresh()
    }

    /// Obtain a new access token regardless of cached state.
    ///
    /// Prefers a refresh-token exchange; a failed refresh (revoked grant,
    /// expired refresh token) falls back to the interactive flow. The
    /// resulting token is persisted before being returned.
    pub fn force_refresh(&mut self) -> Result<String, AuthError> {
        let refresh_token = self
            .current
            .as_ref()
            .and_then(|t| t.refresh_token.clone());

        let refreshed = match refresh_token {
            Some(refresh_token) => match self.refresh(&refresh_token) {
                Ok(token) => token,
                Err(err) => {
                    warn!(error = %err, "Token refresh failed; starting interactive authorization");
                    self.interactive_flow()?
                }
            },
            None => self.interactive_flow()?,
        };

        self.store.save(&refreshed)?;
        let access = refreshed.access_token.clone();
        self.current = Some(refreshed);
        Ok(access)
    }

    fn refresh(&self, refresh_token: &str) -> Result<StoredToken, AuthError> {
        let response = self
            .http
            .post(&self.secrets.token_uri)
            .form(&[
                ("client_id", self.secrets.client_id.as_str()),
                ("client_secret", self.secrets.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()?;

        let token = read_token_response(response, Some(refresh_token.to_string()))?;
        info!("Access token refreshed");
        Ok(token)
    }

    fn interactive_flow(&self) -> Result<StoredToken, AuthError> {
        let listener = TcpListener::bind(("127.0.0.1", 0))?;
        let port = listener.local_addr()?.port();
        let redirect_uri = format!("http://127.0.0.1:{port}");
        let state = uuid::Uuid::new_v4().simple().to_string();

        let scope = SCOPES.join(" ");
        let auth_url = format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent&state={}",
            self.secrets.auth_uri,
            urlencoding::encode(&self.secrets.client_id),
            urlencoding::encode(&redirect_uri),
            urlencoding::encode(&scope),
            state,
        );

        println!("Open this URL in your browser to authorize access:\n\n{auth_url}\n");
        info!(port, "Waiting for the authorization redirect");

        let code = wait_for_redirect(&listener, &state)?;

        let response = self
            .http
            .post(&self.secrets.token_uri)
            .form(&[
                ("code", code.as_str()),
                ("client_id", self.secrets.client_id.as_str()),
                ("client_secret", self.secrets.client_secret.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()?;

        let token = read_token_response(response, None)?;
        info!("Authorization complete");
        Ok(token)
    }
}

/// Turn a token endpoint response into a [`StoredToken`].
///
/// `fallback_refresh` carries the previous refresh token forward when the
/// endpoint does not return a new one (normal for refresh grants).
fn read_token_response(
    response: reqwest::blocking::Response,
    fallback_refresh: Option<String>,
) -> Result<StoredToken, AuthError> {
    let status = response.status();
    let body = response.text().unwrap_or_default();

    if !status.is_success() {
        return Err(AuthError::TokenEndpoint {
            status: status.as_u16(),
            body,
        });
    }

    token_from_body(&body, fallback_refresh, Utc::now())
}

fn token_from_body(
    body: &str,
    fallback_refresh: Option<String>,
    now: DateTime<Utc>,
) -> Result<StoredToken, AuthError> {
    let parsed: TokenResponse =
        serde_json::from_str(body).map_err(|e| AuthError::MalformedToken {
            reason: e.to_string(),
        })?;

    Ok(StoredToken {
        access_token: parsed.access_token,
        refresh_token: parsed.refresh_token.or(fallback_refresh),
        expiry: parsed.expires_in.map(|s| now + Duration::seconds(s)),
    })
}

/// Block until the loopback listener receives the authorization redirect.
///
/// Stray requests (favicons, probes) get a 404 and the wait continues; a
/// redirect with an `error` parameter or a state mismatch aborts.
fn wait_for_redirect(listener: &TcpListener, expected_state: &str) -> Result<String, AuthError> {
    for stream in listener.incoming() {
        let mut stream = stream?;

        let request_line = {
            let mut reader = BufReader::new(&stream);
            let mut line = String::new();
            reader.read_line(&mut line)?;
            line
        };

        let Some(path) = request_line.split_whitespace().nth(1) else {
            respond(&mut stream, "400 Bad Request", "Malformed request.")?;
            continue;
        };

        let Some((_, query)) = path.split_once('?') else {
            respond(&mut stream, "404 Not Found", "Not found.")?;
            continue;
        };
        let params = parse_query(query);

        if let Some(reason) = param(&params, "error") {
            respond(&mut stream, "200 OK", "Authorization was denied.")?;
            return Err(AuthError::Denied { reason });
        }

        let Some(code) = param(&params, "code") else {
            respond(&mut stream, "400 Bad Request", "Missing authorization code.")?;
            return Err(AuthError::MalformedRedirect {
                reason: "redirect carried no code parameter".to_string(),
            });
        };

        if param(&params, "state").as_deref() != Some(expected_state) {
            respond(&mut stream, "400 Bad Request", "State mismatch.")?;
            return Err(AuthError::StateMismatch);
        }

        respond(
            &mut stream,
            "200 OK",
            "Authorization received. You may close this window.",
        )?;
        return Ok(code);
    }

    Err(AuthError::MalformedRedirect {
        reason: "listener closed before receiving a redirect".to_string(),
    })
}

fn respond(stream: &mut TcpStream, status: &str, message: &str) -> std::io::Result<()> {
    let body = format!("<html><body><p>{message}</p></body></html>");
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes())
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    // Invalid percent sequences fall back to the raw text.
    let decoded = urlencoding::decode(&raw).map(Cow::into_owned);
    decoded.unwrap_or(raw)
}

fn param(params: &[(String, String)], key: &str) -> Option<String> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}
