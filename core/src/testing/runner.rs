use std::{
    io,
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use tokio::process::Command;

use super::{build::*, result::*, summary::*, testcase::*};
use crate::{error_list::ErrorList, stopwatch::Stopwatch};

/// I/O failure around a testcase that is unrelated to the solution itself.
#[derive(Debug, thiserror::Error)]
#[error("testcase '{testcase}': {source}")]
pub struct CaseError {
    pub testcase: String,

    #[source]
    pub source: fsutil::Error,
}

impl CaseError {
    fn new(testcase: &FsTestcase, source: fsutil::Error) -> Self {
        Self {
            testcase: testcase.name().to_owned(),
            source,
        }
    }
}

pub type CaseErrors = ErrorList<CaseError>;

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("Cannot create scratch dir in '{}'", .dir.to_string_lossy())]
    ScratchDir {
        dir: PathBuf,

        #[source]
        source: io::Error,
    },

    #[error("Failed to build '{}'", .source_path.to_string_lossy())]
    Build {
        source_path: PathBuf,

        #[source]
        source: BuildError,
    },

    #[error("Failed to discover testcases")]
    Discovery(#[source] fsutil::Error),

    #[error("Failed to run testcases: {0}")]
    CaseInfrastructure(CaseErrors),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub results: Vec<RunResult>,
    pub summary: Summary,
}

/// Builds a solution once and judges it against every testcase in a directory, one at a time.
#[derive(Debug, Clone)]
pub struct Verifier {
    builder: Builder,
    scratch_root: PathBuf,
    time_limit: Option<Duration>,
}

impl Verifier {
    const ARTIFACT_FILENAME: &str = "main";

    pub fn new(builder: Builder) -> Self {
        Self {
            builder,
            scratch_root: std::env::temp_dir(),
            time_limit: None,
        }
    }

    /// Directory in which a per-invocation scratch dir is created (and removed afterwards).
    pub fn scratch_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_root = dir.into();
        self
    }

    pub fn time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    fn create_scratch_dir(&self) -> Result<tempfile::TempDir, VerifyError> {
        let scratch_err = |e| VerifyError::ScratchDir {
            dir: self.scratch_root.clone(),
            source: e,
        };
        std::fs::create_dir_all(&self.scratch_root).map_err(scratch_err)?;
        tempfile::Builder::new()
            .prefix("tmp")
            .tempdir_in(&self.scratch_root)
            .map_err(scratch_err)
    }

    pub async fn verify(
        &self,
        source: impl AsRef<Path>,
        testcase_dir: impl AsRef<Path>,
    ) -> Result<Verification, VerifyError> {
        let source = source.as_ref();
        let testcase_dir = testcase_dir.as_ref();

        // Removed on drop, whichever way this function returns.
        let scratch = self.create_scratch_dir()?;
        let artifact = scratch.path().join(Self::ARTIFACT_FILENAME);

        self.builder
            .build(source, &artifact)
            .await
            .map_err(|e| VerifyError::Build {
                source_path: source.to_owned(),
                source: e,
            })?;

        let testcases = FsTestcase::enumerate(testcase_dir).map_err(VerifyError::Discovery)?;
        log::info!(
            "Running {} testcase(s) in {}",
            testcases.len(),
            testcase_dir.to_string_lossy()
        );

        let mut results = Vec::with_capacity(testcases.len());
        let mut errors = CaseErrors::new();

        for t in &testcases {
            match self.run_testcase(&artifact, scratch.path(), t).await {
                Ok(res) => {
                    log::info!(
                        "{} testcase={} time={:?}",
                        res.verdict,
                        res.testcase_name,
                        res.execution_time
                    );
                    results.push(res);
                }
                Err(e) => {
                    log::warn!("{}", e);
                    errors.push(e);
                }
            }
        }

        errors
            .into_result()
            .map_err(VerifyError::CaseInfrastructure)?;

        let summary = Summary::from_results(&results);
        log::info!(
            "summary slowest_time={:?} slowest_case={} AC={} WA={} TLE={} RE={}",
            summary
                .slowest
                .as_ref()
                .map_or(Duration::ZERO, |s| s.execution_time),
            summary
                .slowest
                .as_ref()
                .map_or("", |s| s.testcase_name.as_str()),
            summary.accepted,
            summary.wrong_answer,
            summary.time_limit_exceeded,
            summary.runtime_error,
        );

        Ok(Verification { results, summary })
    }

    async fn run_testcase(
        &self,
        artifact: &Path,
        scratch_dir: &Path,
        t: &FsTestcase,
    ) -> Result<RunResult, CaseError> {
        let input = fsutil::open_file(t.input_file_path()).map_err(|e| CaseError::new(t, e))?;

        let answer = tempfile::Builder::new()
            .prefix("answer")
            .tempfile_in(scratch_dir)
            .map_err(|e| {
                let msg = "Cannot create answer file";
                CaseError::new(t, fsutil::Error::SingleIO(msg, scratch_dir.to_owned(), e))
            })?;
        let answer_writer = answer.reopen().map_err(|e| {
            let e = fsutil::Error::SingleIO("Cannot open answer file", answer.path().to_owned(), e);
            CaseError::new(t, e)
        })?;

        let sw = Stopwatch::start();
        // Both handles move into the command and are closed once this statement ends.
        let status = Command::new(artifact)
            .stdin(input)
            .stdout(answer_writer)
            .stderr(Stdio::null())
            .status()
            .await;
        let execution_time = sw.elapsed();

        let process_ok = match status {
            Ok(status) if status.success() => true,
            Ok(status) => {
                log::debug!("testcase={}: {}", t.name(), status);
                false
            }
            Err(e) => {
                log::debug!("testcase={}: failed to run: {}", t.name(), e);
                false
            }
        };
        if !process_ok {
            let verdict = Verdict::classify(false, false);
            return Ok(RunResult::new(t.name(), verdict, execution_time));
        }

        let equal = fsutil::files_are_equal(answer.path(), t.expected_file_path())
            .map_err(|e| CaseError::new(t, e))?;
        let verdict =
            Verdict::classify(true, equal).with_time_limit(execution_time, self.time_limit);

        Ok(RunResult::new(t.name(), verdict, execution_time))
    }
}
