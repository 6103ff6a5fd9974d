///! CORS (Cross-Origin Resource Sharing) middleware
///!
///! The viewer API is read-only, so only GET and preflight requests are
///! advertised.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::config::CorsSettings;

/// CORS configuration
#[derive(Clone, Debug)]
pub struct CorsConfig {
    /// Allowed origins (use "*" for any origin)
    pub allowed_origins: Vec<String>,
    /// Allowed HTTP methods
    pub allowed_methods: Vec<Method>,
    /// Allowed headers
    pub allowed_headers: Vec<String>,
    /// Max age for preflight cache (seconds)
    pub max_age: u32,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec![Method::GET, Method::OPTIONS],
            allowed_headers: vec!["accept".to_string(), "content-type".to_string()],
            max_age: 3600,
        }
    }
}

impl From<&CorsSettings> for CorsConfig {
    fn from(settings: &CorsSettings) -> Self {
        Self {
            allowed_origins: settings.allowed_origins.clone(),
            ..Default::default()
        }
    }
}

impl CorsConfig {
    fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }

    fn allows(&self, origin: &str) -> bool {
        self.allows_any() || self.allowed_origins.iter().any(|o| o == origin)
    }

    /// Value for `Access-Control-Allow-Origin`, if any
    fn allow_origin_value(&self, origin: &str) -> Option<HeaderValue> {
        if self.allows_any() {
            Some(HeaderValue::from_static("*"))
        } else if !origin.is_empty() {
            HeaderValue::from_str(origin).ok()
        } else {
            None
        }
    }

    fn insert_preflight_headers(&self, headers: &mut HeaderMap) {
        let methods = self
            .allowed_methods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if let Ok(value) = HeaderValue::from_str(&methods) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, value);
        }

        if let Ok(value) = HeaderValue::from_str(&self.allowed_headers.join(", ")) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
        }

        headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from(self.max_age));
    }
}

/// CORS middleware
pub async fn cors_middleware(config: CorsConfig, request: Request<Body>, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let origin_allowed = config.allows(&origin);

    // Handle preflight OPTIONS request
    if request.method() == Method::OPTIONS {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;

        if origin_allowed {
            let headers = response.headers_mut();
            if let Some(value) = config.allow_origin_value(&origin) {
                headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
            }
            config.insert_preflight_headers(headers);
        }

        return response;
    }

    let mut response = next.run(request).await;

    if origin_allowed {
        if let Some(value) = config.allow_origin_value(&origin) {
            response
                .headers_mut()
                .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
    }

    response
}
