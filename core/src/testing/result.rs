use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Verdict {
    /// Unset. Never produced by a run.
    #[default]
    #[strum(serialize = "?")]
    Unknown,

    #[strum(serialize = "AC")]
    Accepted,

    #[strum(serialize = "WA")]
    WrongAnswer,

    #[strum(serialize = "RE")]
    RuntimeError,

    #[strum(serialize = "TLE")]
    TimeLimitExceeded,
}

impl Verdict {
    /// Judge a finished run from whether the process succeeded and whether its stdout matched.
    pub fn classify(process_ok: bool, output_equal: bool) -> Self {
        use Verdict::*;
        match (process_ok, output_equal) {
            (false, _) => RuntimeError,
            (true, true) => Accepted,
            (true, false) => WrongAnswer,
        }
    }

    /// Overrides the verdict of a successful process that ran longer than `limit`.
    /// The process is never killed; this is a check after the fact.
    pub fn with_time_limit(self, elapsed: Duration, limit: Option<Duration>) -> Self {
        use Verdict::*;
        match (self, limit) {
            (Accepted | WrongAnswer, Some(limit)) if elapsed > limit => TimeLimitExceeded,
            _ => self,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub testcase_name: String,
    pub verdict: Verdict,
    pub execution_time: Duration,
}

impl RunResult {
    pub fn new(
        testcase_name: impl Into<String>,
        verdict: Verdict,
        execution_time: Duration,
    ) -> Self {
        Self {
            testcase_name: testcase_name.into(),
            verdict,
            execution_time,
        }
    }
}
