use std::future::Future;
use std::pin::Pin;

use tide::utils::After;
use tide::{Next, Request};
use tracing::Instrument;

pub mod api;

pub(super) fn mount(app: &mut tide::Server<crate::State>) {
    app.with(trace_request);
    app.with(After(api::error::render));
    api::mount(app);
}

fn trace_request<'a>(
    req: Request<crate::State>,
    next: Next<'a, crate::State>,
) -> Pin<Box<dyn Future<Output = tide::Result> + Send + 'a>> {
    Box::pin(async move {
        let span = tracing::info_span!(
            "request",
            method = %req.method(),
            path = %req.url().path(),
        );

        let res = next.run(req).instrument(span.clone()).await;
        span.in_scope(|| tracing::info!(status = %res.status(), "Request finished"));

        Ok(res)
    })
}
