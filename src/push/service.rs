//! Push orchestration middleware.
//!
//! # Responsibilities
//! - Short-circuit pushed sub-requests and push-incapable connections
//! - Push configured resources before the downstream response is produced
//! - Push resources announced by downstream `Link` headers, once per request
//!
//! # Design Decisions
//! - The first failed push abandons the remaining pushes of its phase: a
//!   push failure usually means the connection or its concurrent stream
//!   limit is exhausted, so later attempts would fail identically
//! - Push failures never become request failures; only downstream errors
//!   reach the caller, and they propagate unchanged

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::header::LINK;
use http::{HeaderMap, Method, Request, Response};
use tower::{Layer, Service};

use crate::config::{PushConfig, PushResource};
use crate::header_ops::HeaderOps;
use crate::observability::metrics;
use crate::push::headers::{initialize_push_headers, PUSH_HEADER};
use crate::push::link;
use crate::replacer::Replacer;
use crate::transport::{PushHandle, PushRequest, PushedLinks};

/// `tower::Layer` producing [`PushService`] middlewares from a validated
/// configuration.
#[derive(Clone, Debug)]
pub struct PushLayer {
    resources: Arc<[PushResource]>,
    header_ops: Option<Arc<HeaderOps>>,
}

impl PushLayer {
    /// Build a layer from a validated configuration. Only the push section
    /// is consulted; observability settings are handled by the embedding
    /// application.
    pub fn new(config: &PushConfig) -> Self {
        Self {
            resources: config.resources.clone().into(),
            header_ops: config.headers.clone().map(Arc::new),
        }
    }
}

impl<S> Layer<S> for PushLayer {
    type Service = PushService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PushService {
            inner,
            resources: self.resources.clone(),
            header_ops: self.header_ops.clone(),
        }
    }
}

/// Middleware orchestrating server pushes around an inner service.
#[derive(Clone, Debug)]
pub struct PushService<S> {
    inner: S,
    resources: Arc<[PushResource]>,
    header_ops: Option<Arc<HeaderOps>>,
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for PushService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        // Take the service that was polled ready; leave the clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        // The connection supports push only if the transport attached a
        // handle; a request already carrying the marker is a pushed
        // sub-request. Either way: serve without pushing.
        let pusher = match req.extensions().get::<PushHandle>() {
            Some(handle) if !req.headers().contains_key(&PUSH_HEADER) => handle.clone(),
            _ => return Box::pin(async move { inner.call(req).await }),
        };

        let repl = req
            .extensions()
            .get::<Replacer>()
            .cloned()
            .unwrap_or_default();

        // One header set per request, shared by every push attempt.
        let hdr = initialize_push_headers(req.headers(), &repl, self.header_ops.as_deref());

        // push first!
        push_configured(&self.resources, &pusher, &repl, &hdr, &req);

        // Stacked push middlewares within one request share this flag
        // through the request extensions.
        let pushed_links = match req.extensions().get::<PushedLinks>() {
            Some(flag) => flag.clone(),
            None => {
                let flag = PushedLinks::default();
                req.extensions_mut().insert(flag.clone());
                flag
            }
        };

        Box::pin(async move {
            // serve only after pushing!
            let response = inner.call(req).await?;

            // Finally, push any resources described by Link fields written
            // to the response, unless another instance already has.
            if response.headers().contains_key(LINK) && !pushed_links.test_and_set() {
                serve_preload_links(&pusher, &hdr, response.headers());
            }

            Ok(response)
        })
    }
}

/// Push every configured resource in list order, expanding targets through
/// the request's replacer. Stops at the first failed push.
fn push_configured<B>(
    resources: &[PushResource],
    pusher: &PushHandle,
    repl: &Replacer,
    hdr: &HeaderMap,
    req: &Request<B>,
) {
    for resource in resources {
        let target = repl.expand_or(&resource.target, ".");
        tracing::debug!(
            uri = %req.uri(),
            push_method = %resource.method,
            push_target = %target,
            push_headers = ?hdr,
            "Pushing resource"
        );
        metrics::record_push_attempt("configured");
        let push = PushRequest::new(resource.push_method(), target, hdr.clone());
        if let Err(error) = pusher.push(push) {
            // Usually this means push got disabled or concurrent streams
            // are full.
            tracing::debug!(%error, "Push failed, abandoning remaining configured resources");
            metrics::record_push_failure("configured");
            break;
        }
    }
}

/// Parse the response's `Link` fields and push every eligible resource with
/// method GET. Link attributes never override the method. Stops at the
/// first failed push.
fn serve_preload_links(pusher: &PushHandle, hdr: &HeaderMap, response_headers: &HeaderMap) {
    let values: Vec<&str> = response_headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    tracing::debug!(linked = ?values, "Pushing Link resources");

    for entry in values.iter().flat_map(|value| link::parse(value)) {
        if !entry.is_pushable() {
            continue;
        }
        metrics::record_push_attempt("link");
        let push = PushRequest::new(Method::GET, entry.uri(), hdr.clone());
        if let Err(error) = pusher.push(push) {
            tracing::debug!(%error, "Push failed, abandoning remaining Link resources");
            metrics::record_push_failure("link");
            break;
        }
    }
}
