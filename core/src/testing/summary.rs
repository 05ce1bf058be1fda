use std::time::Duration;

use super::result::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlowestCase {
    pub testcase_name: String,
    pub execution_time: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub accepted: usize,
    pub wrong_answer: usize,
    pub time_limit_exceeded: usize,
    pub runtime_error: usize,
    pub slowest: Option<SlowestCase>,
}

impl Summary {
    /// Counts verdicts and picks the slowest case.
    /// On a tie the earliest result wins.
    pub fn from_results(results: &[RunResult]) -> Self {
        results.iter().fold(Self::default(), |mut s, r| {
            use Verdict::*;
            match r.verdict {
                Accepted => s.accepted += 1,
                WrongAnswer => s.wrong_answer += 1,
                TimeLimitExceeded => s.time_limit_exceeded += 1,
                RuntimeError => s.runtime_error += 1,
                Unknown => (),
            }

            let is_slower = match &s.slowest {
                None => true,
                Some(slowest) => r.execution_time > slowest.execution_time,
            };
            if is_slower {
                s.slowest = Some(SlowestCase {
                    testcase_name: r.testcase_name.clone(),
                    execution_time: r.execution_time,
                });
            }
            s
        })
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        use Verdict::*;
        match verdict {
            Accepted => self.accepted,
            WrongAnswer => self.wrong_answer,
            TimeLimitExceeded => self.time_limit_exceeded,
            RuntimeError => self.runtime_error,
            Unknown => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.accepted + self.wrong_answer + self.time_limit_exceeded + self.runtime_error
    }

    pub fn is_all_accepted(&self) -> bool {
        self.accepted == self.total()
    }
}
