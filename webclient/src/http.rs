use std::{sync::Arc, time::Duration};

use ::tokio::sync::Mutex;
use ::tokio::time::{Interval, MissedTickBehavior};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::*;

pub use ::reqwest::{IntoUrl, Url};

/// HTTP client that keeps at least `req_interval` between two consecutive requests.
#[derive(Clone)]
pub struct Client {
    inner: ::reqwest::Client,
    req_interval: Option<Arc<Mutex<Interval>>>,
}

impl Client {
    pub fn new(req_interval: Duration) -> Result<Self> {
        let inner = ::reqwest::Client::builder().gzip(true).build()?;

        // `tokio::time::interval()` panics on zero period
        let req_interval = (!req_interval.is_zero()).then(|| {
            let mut interval = ::tokio::time::interval(req_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            Arc::new(Mutex::new(interval))
        });

        Ok(Self {
            inner,
            req_interval,
        })
    }

    async fn wait_for_next_slot(&self) {
        if let Some(interval) = &self.req_interval {
            interval.lock().await.tick().await;
        }
    }

    /// GET `url` and deserialize the response body as JSON.
    /// Any status other than `200 OK` is an error.
    pub async fn get_json<T: DeserializeOwned>(&self, url: impl IntoUrl) -> Result<T> {
        let url = url.into_url()?;
        let url_str = url.to_string();

        self.wait_for_next_slot().await;
        log::debug!("GET {}", url_str);
        let resp = self.inner.get(url).send().await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedResponseCode {
                got: status,
                expected: StatusCode::OK,
                requested_url: url_str,
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Json {
            requested_url: url_str,
            source: e,
        })
    }
}
