//! Pooled hyper transport.

use super::{ConnectionSettings, Transport, TransportError};
use crate::http::{GatewayRequest, GatewayResponse, StatusCode};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full};
use hyper::header::AUTHORIZATION;
use hyper::Uri;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::{Connect, HttpConnector};
use hyper_util::client::legacy::Client;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::decompression::DecompressionLayer;
use tracing::debug;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type ResponseBody = UnsyncBoxBody<Bytes, BoxError>;

#[derive(Clone)]
enum Pool {
    Http(Client<HttpConnector, Full<Bytes>>),
    Https(Client<HttpsConnector<HttpConnector>, Full<Bytes>>),
}

/// Connection-reuse handle for one gateway.
///
/// The connector is picked from the gateway scheme once, at construction.
/// Clones share the same connection pool, so a single agent can serve any
/// number of overlapping calls.
#[derive(Clone)]
pub struct Agent {
    pool: Pool,
    settings: ConnectionSettings,
}

impl Agent {
    /// Build an agent for the given gateway address.
    pub fn new(gateway: &str, settings: &ConnectionSettings) -> Self {
        let mut http = HttpConnector::new();
        let mut builder = Client::builder(TokioExecutor::new());
        builder.pool_timer(TokioTimer::new());

        if settings.keep_alive {
            http.set_keepalive(Some(settings.keep_alive_interval()));
            builder.pool_idle_timeout(settings.keep_alive_interval());
        } else {
            builder.pool_max_idle_per_host(0);
        }

        let pool = if is_secure(gateway) {
            http.enforce_http(false);
            let https = hyper_rustls::HttpsConnectorBuilder::new()
                .with_webpki_roots()
                .https_only()
                .enable_http1()
                .wrap_connector(http);
            Pool::Https(builder.build(https))
        } else {
            Pool::Http(builder.build(http))
        };

        debug!(
            "Created {} agent (keep_alive={}, keep_alive_msecs={})",
            if matches!(pool, Pool::Https(_)) { "https" } else { "http" },
            settings.keep_alive,
            settings.keep_alive_msecs
        );

        Self {
            pool,
            settings: settings.clone(),
        }
    }

    /// Whether this agent speaks TLS.
    pub fn is_secure(&self) -> bool {
        matches!(self.pool, Pool::Https(_))
    }

    /// Settings the pool was built with.
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("secure", &self.is_secure())
            .field("settings", &self.settings)
            .finish()
    }
}

#[async_trait]
impl Transport for Agent {
    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse, TransportError> {
        let (uri, credentials) = split_credentials(&request.url)?;

        let mut builder = hyper::Request::builder()
            .method(hyper::Method::from(request.method))
            .uri(uri.clone());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(credentials) = credentials {
            if request.get_header(AUTHORIZATION.as_str()).is_none() {
                builder = builder.header(AUTHORIZATION, credentials);
            }
        }

        let hyper_request = builder
            .body(Full::new(request.body.clone().unwrap_or_default()))
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        debug!("Sending {} {}", request.method, uri);

        let result = match &self.pool {
            Pool::Http(client) => exchange(client, hyper_request, request.compress).await,
            Pool::Https(client) => exchange(client, hyper_request, request.compress).await,
        };
        let response = result.map_err(|e| TransportError::Connect(describe(&e)))?;

        let status = response.status().as_u16();
        let status_text = response
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
            .or_else(|| response.status().canonical_reason())
            .unwrap_or_default()
            .to_string();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_string(), v.to_string());
            }
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| body_error(status, e))?
            .to_bytes();

        debug!("Received {} ({} bytes) from {}", status, body.len(), uri);

        Ok(GatewayResponse {
            status: StatusCode(status),
            status_text,
            headers,
            body,
        })
    }
}

fn is_secure(gateway: &str) -> bool {
    gateway
        .trim_start()
        .get(..6)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https:"))
}

/// Strip `user:pass@` from the URL and turn it into a Basic credential.
fn split_credentials(url: &str) -> Result<(Uri, Option<String>), TransportError> {
    let uri: Uri = url
        .parse()
        .map_err(|e| TransportError::InvalidRequest(format!("invalid gateway URL: {e}")))?;

    let split = uri
        .authority()
        .and_then(|authority| authority.as_str().rsplit_once('@'))
        .map(|(userinfo, host)| (userinfo.to_string(), host.to_string()));
    let Some((userinfo, host)) = split else {
        return Ok((uri, None));
    };

    let (user, password) = userinfo.split_once(':').unwrap_or((userinfo.as_str(), ""));
    let user = percent_decode_str(user).decode_utf8_lossy();
    let password = percent_decode_str(password).decode_utf8_lossy();
    let credentials = format!("Basic {}", STANDARD.encode(format!("{user}:{password}")));

    let mut parts = uri.into_parts();
    parts.authority = Some(
        host.parse()
            .map_err(|e| TransportError::InvalidRequest(format!("invalid gateway host: {e}")))?,
    );
    let uri = Uri::from_parts(parts)
        .map_err(|e| TransportError::InvalidRequest(format!("invalid gateway URL: {e}")))?;

    Ok((uri, Some(credentials)))
}

/// Send through the pool, behind a decompression layer when `compress` is set.
///
/// The layer advertises `gzip,deflate` unless the request already carries an
/// `Accept-Encoding`, and inflates whatever the gateway marks as compressed.
async fn exchange<C>(
    client: &Client<C, Full<Bytes>>,
    request: hyper::Request<Full<Bytes>>,
    compress: bool,
) -> Result<hyper::Response<ResponseBody>, hyper_util::client::legacy::Error>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    if compress {
        let response = ServiceBuilder::new()
            .layer(DecompressionLayer::new())
            .service(client.clone())
            .oneshot(request)
            .await?;
        Ok(box_body(response))
    } else {
        Ok(box_body(client.request(request).await?))
    }
}

fn box_body<B>(response: hyper::Response<B>) -> hyper::Response<ResponseBody>
where
    B: hyper::body::Body<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    let (parts, body) = response.into_parts();
    hyper::Response::from_parts(parts, body.map_err(Into::into).boxed_unsync())
}

/// Decoder failures surface as I/O errors; anything else is the connection.
fn body_error(status: u16, err: BoxError) -> TransportError {
    let message = describe(&*err);
    if err.is::<std::io::Error>() {
        TransportError::Decompress { status, message }
    } else {
        TransportError::Body { status, message }
    }
}

/// Render an error together with its source chain.
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
