//! Route handler abstraction.
//!
//! A handler is any `Fn(ApiRequest, ApiResponse) -> impl Future<Output = HandlerResult>`.
//! Registration type-erases it into a [`BoxedHandler`] so declarative and
//! imperative modules can hold handlers of different concrete types.

use std::{future::Future, pin::Pin, sync::Arc};

use axum::{extract::Request, response::Response};

use crate::app::errors::HandlerError;
use crate::context::ApiRequest;
use crate::response::ApiResponse;

/// What a handler resolves to: a finished response, or an error for the error layer.
pub type HandlerResult = Result<Response, HandlerError>;

/// Boxed handler future.
pub type HandlerFuture = Pin<Box<dyn Future<Output = HandlerResult> + Send + 'static>>;

/// Asynchronous route handler.
pub trait RouteHandler: Send + Sync + 'static {
    fn call(&self, request: ApiRequest, response: ApiResponse) -> HandlerFuture;
}

impl<F, Fut> RouteHandler for F
where
    F: Fn(ApiRequest, ApiResponse) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, request: ApiRequest, response: ApiResponse) -> HandlerFuture {
        Box::pin(self(request, response))
    }
}

/// Shared, type-erased handler.
#[derive(Clone)]
pub struct BoxedHandler(Arc<dyn RouteHandler>);

impl BoxedHandler {
    /// Box a closure. The explicit `Fn` bound lets closure argument and
    /// return types be inferred at the call site.
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(ApiRequest, ApiResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self(Arc::new(handler))
    }

    /// Box a hand-written [`RouteHandler`] implementation.
    pub fn from_handler(handler: impl RouteHandler) -> Self {
        Self(Arc::new(handler))
    }

    pub fn call(&self, request: ApiRequest, response: ApiResponse) -> HandlerFuture {
        self.0.call(request, response)
    }
}

impl core::fmt::Debug for BoxedHandler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("BoxedHandler(..)")
    }
}

/// Serve one request: buffer it, build a fresh adapter, run the handler once.
///
/// Errors are returned, not swallowed; `HandlerError: IntoResponse` turns them
/// into the error envelope.
pub(crate) async fn dispatch(handler: BoxedHandler, route: Arc<str>, req: Request) -> HandlerResult {
    let request = ApiRequest::from_request(req).await?;
    handler.call(request, ApiResponse::new(route)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn closures_are_handlers() {
        let handler = BoxedHandler::new(|req, res| async move {
            Ok(res.success(req.path().to_string()))
        });

        let resp = handler
            .call(
                ApiRequest::new(Method::GET, "/api/ping".parse().unwrap()),
                ApiResponse::new("GET /api/ping"),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn handler_errors_are_returned_to_the_caller() {
        let handler = BoxedHandler::new(|_req, res| async move {
            let n: u32 = "nope".parse()?;
            Ok(res.success(n))
        });

        let err = handler
            .call(
                ApiRequest::new(Method::GET, "/".parse().unwrap()),
                ApiResponse::new("GET /"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    struct Greeting {
        name: &'static str,
    }

    impl RouteHandler for Greeting {
        fn call(&self, _request: ApiRequest, response: ApiResponse) -> HandlerFuture {
            let name = self.name;
            Box::pin(async move { Ok(response.success(format!("hello {name}"))) })
        }
    }

    #[tokio::test]
    async fn hand_written_handlers_can_be_boxed() {
        let handler = BoxedHandler::from_handler(Greeting { name: "ada" });
        let resp = handler
            .call(
                ApiRequest::new(Method::GET, "/hello".parse().unwrap()),
                ApiResponse::new("GET /hello"),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"], "hello ada");
    }
}
