use std::time::Duration;

use async_trait::async_trait;

use super::urls;
use crate::{
    error::*,
    http::{self, Url},
    ProblemId, Testcase, TestcaseHeader, TestcaseHeaders, TestcaseProvider,
};

/// Client for the AOJ judgedat API.
#[derive(Clone)]
pub struct AojClient {
    http: http::Client,
}

impl AojClient {
    pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_secs(3);

    pub fn with_request_interval(interval: Duration) -> Result<Self> {
        Ok(Self {
            http: http::Client::new(interval)?,
        })
    }

    fn parse_url(url: String) -> Result<Url> {
        Url::parse(&url).map_err(|e| Error::InvalidSyntaxUrl { url, source: e })
    }
}

#[async_trait]
impl TestcaseProvider for AojClient {
    async fn fetch_testcase_headers(&self, problem_id: &ProblemId) -> Result<Vec<TestcaseHeader>> {
        let url = Self::parse_url(urls::testcase_header_url(problem_id))?;
        let resp: TestcaseHeaders = self.http.get_json(url).await?;
        Ok(resp.headers)
    }

    async fn fetch_testcase(&self, problem_id: &ProblemId, serial: u32) -> Result<Testcase> {
        let url = Self::parse_url(urls::testcase_url(problem_id, serial))?;
        self.http.get_json(url).await
    }
}
