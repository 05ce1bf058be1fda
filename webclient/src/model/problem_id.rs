use serde::{Deserialize, Serialize};

use super::Url;
use crate::AojUrlAnalyzer;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Cannot parse as URL (given '{0}')")]
    CannotParseAsUrl(String),

    #[error("Unsupported URL (not an AOJ problem URL): '{0}'")]
    UnsupportedUrl(Url),

    #[error("No problem ID in URL: '{0}'")]
    NoProblemId(Url),
}

/// Problem identification on AOJ.
/// (e.g.) "ALDS1_14_A", "ITP1_1_A", "0001"
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
pub struct ProblemId(pub(crate) String);

impl ProblemId {
    pub fn new(problem_id: impl AsRef<str>) -> Self {
        Self(problem_id.as_ref().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn from_url_str(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        let url = Url::parse(url).map_err(|_| Error::CannotParseAsUrl(url.to_owned()))?;
        Self::try_from(&url)
    }
}

impl<'a> TryFrom<&'a Url> for ProblemId {
    type Error = Error;

    fn try_from(url: &'a Url) -> Result<Self> {
        AojUrlAnalyzer::extract_problem_id(url)
    }
}

impl std::fmt::Display for ProblemId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProblemId {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}
