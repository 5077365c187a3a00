//! Per-request span and response counter.

use axum::{body::Body, extract::MatchedPath, http::Request, response::Response};
use campus_telemetry::HTTP_REQUESTS;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{field, info_span, Instrument, Span};

/// Tracing layer that creates a span for each request
#[derive(Clone, Default)]
pub struct TracingLayer;

impl TracingLayer {
    /// New layer.
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for TracingLayer {
    type Service = TracingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TracingService { inner }
    }
}

/// Tracing service
#[derive(Clone)]
pub struct TracingService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for TracingService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();

        let route = route_label(&req);
        let span = info_span!(
            "http_request",
            http.method = %req.method(),
            http.route = %route,
            http.status_code = field::Empty,
        );

        Box::pin(
            async move {
                let result = inner.call(req).await;

                if let Ok(response) = &result {
                    let status = response.status().as_u16();
                    Span::current().record("http.status_code", status);
                    HTTP_REQUESTS
                        .with_label_values(&[route.as_str(), status.to_string().as_str()])
                        .inc();
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Matched route template, so path parameters do not explode label
/// cardinality.
fn route_label<B>(req: &Request<B>) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string())
}
