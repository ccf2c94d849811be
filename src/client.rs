// File: src/client.rs
// HTTP transport shared by every page: TLS, session cookie, CSRF header, JSON.
use crate::config::Config;
use crate::error::{ApiError, Result};

use bytes::Bytes;
use http::{Method, StatusCode, Uri};
use log::{debug, error, warn};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{self, HeaderValue};
use reqwest::{Client, Url, multipart};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;

pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const CSRF_TOKEN_PATH: &str = "/csrf-token";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Anti-forgery token, fetched once and cached for the client's lifetime.
///
/// A failed fetch leaves the cache empty; guarded requests then carry an
/// empty header and the backend decides what to do with them.
#[derive(Debug, Default)]
pub struct CsrfGuard {
    token: Mutex<Option<String>>,
}

impl CsrfGuard {
    pub fn token(&self) -> Option<String> {
        lock(&self.token).clone()
    }

    pub fn store(&self, token: String) {
        *lock(&self.token) = Some(token);
    }

    pub fn header_value(&self) -> String {
        self.token().unwrap_or_default()
    }

    /// Only state-changing methods carry the token.
    pub fn guards(method: &Method) -> bool {
        matches!(
            *method,
            Method::POST | Method::PUT | Method::DELETE | Method::PATCH
        )
    }
}

/// reqwest's cookie jar, swappable so logout can drop the session.
#[derive(Debug, Default)]
struct SessionJar {
    jar: RwLock<Jar>,
}

impl SessionJar {
    fn clear(&self) {
        let mut jar = self.jar.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *jar = Jar::default();
    }
}

impl CookieStore for SessionJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let jar = self.jar.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        jar.set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        let jar = self.jar.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        jar.cookies(url)
    }
}

#[derive(Debug)]
pub enum Payload {
    Empty,
    Json(Vec<u8>),
    Multipart(multipart::Form),
}

impl Payload {
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        Ok(Payload::Json(serde_json::to_vec(body)?))
    }

    /// Single-file `multipart/form-data` body.
    pub fn multipart(field: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Result<Self> {
        let part = multipart::Part::bytes(bytes.to_vec())
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        Ok(Payload::Multipart(
            multipart::Form::new().part(field.to_string(), part),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct CsrfResponse {
    csrf_token: String,
}

/// Decodes a 2xx body into `T`. Anything else becomes
/// [`ApiError::Status`] carrying the body's `error` field, or `fallback`.
pub fn decode<T: DeserializeOwned>(response: RawResponse, fallback: &str) -> Result<T> {
    if response.status.is_success() {
        let body: &[u8] = if response.body.is_empty() {
            b"{}"
        } else {
            &response.body
        };
        return Ok(serde_json::from_slice(body)?);
    }
    let message = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    Err(ApiError::Status {
        status: response.status.as_u16(),
        message,
    })
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    timeout: Duration,
    csrf: Arc<CsrfGuard>,
    cookies: Arc<SessionJar>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("csrf", &self.csrf)
            .finish()
    }
}

impl ApiClient {
    pub fn new(url: &str, insecure: bool) -> Result<Self> {
        let base_url = url.trim().trim_end_matches('/').to_string();
        // Validate early so a typo fails at startup, not on first click.
        let _: Uri = base_url.parse()?;

        let cookies = Arc::new(SessionJar::default());
        let http = Client::builder()
            .use_preconfigured_tls(tls_config(&base_url, insecure)?)
            .cookie_provider(cookies.clone())
            .build()?;

        Ok(Self {
            base_url,
            http,
            timeout: Duration::from_secs(30),
            csrf: Arc::new(CsrfGuard::default()),
            cookies,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(&config.url, config.allow_insecure_certs)?
            .with_timeout(Duration::from_secs(config.request_timeout_secs.max(1))))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn csrf(&self) -> &CsrfGuard {
        &self.csrf
    }

    pub fn csrf_token(&self) -> Option<String> {
        self.csrf.token()
    }

    /// Fetches the token unless one is already cached. Failures are logged
    /// and swallowed.
    pub async fn prime_csrf(&self) -> Option<String> {
        if let Some(token) = self.csrf.token() {
            return Some(token);
        }
        match self
            .get_json::<CsrfResponse>(CSRF_TOKEN_PATH, "Failed to fetch CSRF token")
            .await
        {
            Ok(resp) => {
                self.csrf.store(resp.csrf_token.clone());
                Some(resp.csrf_token)
            }
            Err(e) => {
                error!("Failed to get CSRF token: {}", e);
                None
            }
        }
    }

    pub fn forget_session(&self) {
        self.cookies.clear();
    }

    pub async fn send(&self, method: Method, path: &str, payload: Payload) -> Result<RawResponse> {
        let mut request = self
            .http
            .request(method.clone(), self.url(path))
            .timeout(self.timeout)
            .header(header::ACCEPT, "application/json");

        if CsrfGuard::guards(&method) {
            request = request.header(CSRF_HEADER, self.csrf.header_value());
        }

        request = match payload {
            Payload::Empty => request,
            Payload::Json(bytes) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(bytes),
            Payload::Multipart(form) => request.multipart(form),
        };

        debug!("{} {}", method, path);
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            warn!("{} {} -> {}", method, path, status);
        }
        Ok(RawResponse { status, body })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T> {
        let response = self.send(Method::GET, path, Payload::Empty).await?;
        decode(response, fallback)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B, fallback: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, Payload::json(body)?).await?;
        decode(response, fallback)
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T> {
        let response = self.send(Method::POST, path, Payload::Empty).await?;
        decode(response, fallback)
    }
}

fn tls_config(url: &str, insecure: bool) -> Result<rustls::ClientConfig> {
    let builder = rustls::ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .map_err(|e| ApiError::Tls(e.to_string()))?;

    let config = if insecure {
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoVerifier))
            .with_no_client_auth()
    } else {
        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        root_store.add_parsable_certificates(result.certs);

        // Plain HTTP deployments (and local test servers) need no roots.
        if root_store.is_empty() && url.starts_with("https://") {
            return Err(ApiError::Tls("No valid system certificates found.".to_string()));
        }

        builder
            .with_root_certificates(root_store)
            .with_no_client_auth()
    };
    Ok(config)
}

#[derive(Debug)]
struct NoVerifier;
impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &[rustls::pki_types::CertificateDer<'_>],
        _: &rustls::pki_types::ServerName<'_>,
        _: &[u8],
        _: rustls::pki_types::UnixTime,
    ) -> std::result::Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }
    fn verify_tls12_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn verify_tls13_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        use rustls::SignatureScheme::*;
        vec![
            RSA_PKCS1_SHA256,
            RSA_PKCS1_SHA384,
            RSA_PKCS1_SHA512,
            ECDSA_NISTP256_SHA256,
            RSA_PSS_SHA256,
            ED25519,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_state_changing_methods_are_guarded() {
        assert!(CsrfGuard::guards(&Method::POST));
        assert!(CsrfGuard::guards(&Method::DELETE));
        assert!(CsrfGuard::guards(&Method::PATCH));
        assert!(CsrfGuard::guards(&Method::PUT));
        assert!(!CsrfGuard::guards(&Method::GET));
        assert!(!CsrfGuard::guards(&Method::HEAD));
    }

    #[test]
    fn empty_guard_sends_empty_header() {
        let guard = CsrfGuard::default();
        assert_eq!(guard.header_value(), "");
        guard.store("abc".into());
        assert_eq!(guard.header_value(), "abc");
    }

    #[test]
    fn session_jar_tracks_and_clears() {
        let jar = SessionJar::default();
        let url: Url = "http://learn.test/api/login".parse().unwrap();
        let set = [
            HeaderValue::from_static("session=xyz; HttpOnly; Path=/"),
            HeaderValue::from_static("remember=1; Path=/"),
        ];
        jar.set_cookies(&mut set.iter(), &url);

        let home: Url = "http://learn.test/api/content".parse().unwrap();
        let header = jar.cookies(&home).unwrap();
        let header = header.to_str().unwrap();
        assert!(header.contains("session=xyz"));
        assert!(header.contains("remember=1"));

        jar.clear();
        assert!(jar.cookies(&home).is_none());
    }

    #[test]
    fn multipart_rejects_bad_content_type() {
        let Payload::Multipart(form) =
            Payload::multipart("avatar", "me.png", "image/png", b"PNGDATA").unwrap()
        else {
            panic!("expected multipart");
        };
        assert!(!form.boundary().is_empty());

        let err = Payload::multipart("avatar", "me.png", "not a type", b"x").unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn decode_uses_backend_error_verbatim() {
        let resp = RawResponse {
            status: StatusCode::UNAUTHORIZED,
            body: Bytes::from_static(br#"{"error": "Invalid username or password."}"#),
        };
        let err = decode::<serde_json::Value>(resp, "Login failed").unwrap_err();
        assert_eq!(err.user_message(), "Invalid username or password.");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn decode_falls_back_without_error_field() {
        let resp = RawResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: Bytes::from_static(b"<html>oops</html>"),
        };
        let err = decode::<serde_json::Value>(resp, "Failed to fetch content").unwrap_err();
        assert_eq!(err.user_message(), "Failed to fetch content");
    }
}
