use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::*;

pub mod problem_id;
pub use problem_id::ProblemId;
pub use reqwest::Url;

/// An entry of `GET /testcases/{problemId}/header`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestcaseHeader {
    pub serial: u32,
    pub name: String,
    pub input_size: u64,
    pub output_size: u64,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestcaseHeaders {
    pub problem_id: String,
    pub headers: Vec<TestcaseHeader>,
}

/// Response of `GET /testcases/{problemId}/{serial}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testcase {
    pub problem_id: String,
    pub serial: u32,
    #[serde(rename = "in")]
    pub input: String,
    #[serde(rename = "out")]
    pub expected: String,
}

#[async_trait]
pub trait TestcaseProvider: Send + Sync {
    async fn fetch_testcase_headers(&self, problem_id: &ProblemId) -> Result<Vec<TestcaseHeader>>;

    async fn fetch_testcase(&self, problem_id: &ProblemId, serial: u32) -> Result<Testcase>;
}
