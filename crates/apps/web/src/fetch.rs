use foundation::time::Time;
use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use gloo_net::http::Request;
use runtime::clock::Clock;
use session::{FetchError, OverlaySource};
use web_sys::RequestCache;

/// Fetches overlay payloads over HTTP, bypassing the browser cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpSource;

impl OverlaySource for HttpSource {
    fn fetch(&self, url: &str) -> LocalBoxFuture<'static, Result<String, FetchError>> {
        let url = url.to_string();
        async move {
            let resp = Request::get(&url)
                .cache(RequestCache::NoStore)
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(FetchError::Status(resp.status()));
            }
            resp.text()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))
        }
        .boxed_local()
    }
}

/// Wall clock over `Date.now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsClock;

impl Clock for JsClock {
    fn now(&self) -> Time {
        Time::from_millis(js_sys::Date::now())
    }
}
