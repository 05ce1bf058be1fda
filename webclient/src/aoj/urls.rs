use ::lazy_regex::{lazy_regex, Lazy, Regex};

use crate::{problem_id, ProblemId, Url};

static RE_PROBLEM_ID: Lazy<Regex> = lazy_regex!(r"^[0-9A-Za-z_-]+$");

/// e.g. https://judge.u-aizu.ac.jp/onlinejudge/description.jsp?id=ALDS1_14_A
pub const DOMAIN_JUDGE: &str = "judge.u-aizu.ac.jp";

/// e.g. https://onlinejudge.u-aizu.ac.jp/courses/lesson/1/ALDS1/14/ALDS1_14_A
pub const DOMAIN_ONLINEJUDGE: &str = "onlinejudge.u-aizu.ac.jp";

pub const JUDGEDAT_ORIGIN: &str = "https://judgedat.u-aizu.ac.jp";

pub fn testcase_header_url(problem_id: &ProblemId) -> String {
    format!("{}/testcases/{}/header", JUDGEDAT_ORIGIN, problem_id)
}

pub fn testcase_url(problem_id: &ProblemId, serial: u32) -> String {
    format!("{}/testcases/{}/{}", JUDGEDAT_ORIGIN, problem_id, serial)
}

pub struct AojUrlAnalyzer;

impl AojUrlAnalyzer {
    pub fn is_aoj(url: &Url) -> bool {
        matches!(url.domain(), Some(DOMAIN_JUDGE) | Some(DOMAIN_ONLINEJUDGE))
    }

    pub fn extract_problem_id(url: &Url) -> problem_id::Result<ProblemId> {
        use problem_id::Error;

        let id = match url.domain() {
            Some(DOMAIN_JUDGE) => url
                .query_pairs()
                .find(|(k, _)| k == "id")
                .map(|(_, v)| v.into_owned()),
            Some(DOMAIN_ONLINEJUDGE) => url
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .map(str::to_owned),
            _ => return Err(Error::UnsupportedUrl(url.to_owned())),
        };

        match id {
            Some(id) if RE_PROBLEM_ID.is_match(&id) => Ok(ProblemId(id)),
            _ => Err(Error::NoProblemId(url.to_owned())),
        }
    }
}
