pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use std::path::{Path, PathBuf};

use aojv_webclient::{ProblemId, TestcaseHeader, TestcaseProvider};
use error::*;

use crate::annotation::Annotation;
use crate::cache;
use crate::config::Config;
use crate::error_list::ErrorList;
use crate::style;
use crate::testing::{Verification, Verifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub testcase_dir: PathBuf,
    pub num_fetched: usize,
    pub num_cached: usize,
}

/// Resolve the annotation of `program_file` to its testcase cache dir.
pub fn locate_testcase_dir(
    program_file: impl AsRef<Path>,
    cfg: &Config,
) -> Result<(Annotation, PathBuf)> {
    let program_file = program_file.as_ref();
    let annotation = Annotation::read_from_file(program_file)
        .with_context(|| format!("Failed to read annotation of {:?}", program_file))?;
    let dir = cache::testcase_dir(cfg.cache_root(), &annotation.problem_url);
    Ok((annotation, dir))
}

/// Download every testcase of the problem that is not in `testcase_dir` yet.
/// A failed testcase does not stop the others; all failures are reported together.
pub async fn fetch_testcases(
    provider: &dyn TestcaseProvider,
    problem_url: &str,
    testcase_dir: impl AsRef<Path>,
) -> Result<FetchReport> {
    let testcase_dir = testcase_dir.as_ref();
    let problem_id = ProblemId::from_url_str(problem_url)?;

    let headers = provider
        .fetch_testcase_headers(&problem_id)
        .await
        .with_context(|| format!("Failed to fetch testcase headers of {}", problem_id))?;

    let mut report = FetchReport {
        testcase_dir: testcase_dir.to_owned(),
        num_fetched: 0,
        num_cached: 0,
    };
    let mut errors = ErrorList::new();

    for h in &headers {
        if cache::is_testcase_cached(testcase_dir, &h.name) {
            report.num_cached += 1;
            continue;
        }
        match self::fetch_and_save_testcase(provider, &problem_id, h, testcase_dir).await {
            Ok(()) => report.num_fetched += 1,
            Err(e) => {
                log::warn!("{:#}", e);
                errors.push(e);
            }
        }
    }

    errors.into_result().map_err(|errs| {
        anyhow!(errs).context(format!("Failed to fetch testcases of {}", problem_id))
    })?;

    log::info!(
        "Testcases of {} are ready in {} (fetched={}, cached={})",
        problem_id,
        testcase_dir.to_string_lossy(),
        report.num_fetched,
        report.num_cached,
    );
    Ok(report)
}

async fn fetch_and_save_testcase(
    provider: &dyn TestcaseProvider,
    problem_id: &ProblemId,
    header: &TestcaseHeader,
    dir: &Path,
) -> Result<()> {
    let t = provider
        .fetch_testcase(problem_id, header.serial)
        .await
        .with_context(|| format!("Failed to fetch testcase '{}'", header.name))?;
    let (infile, outfile) = cache::save_testcase(dir, &header.name, &t)
        .with_context(|| format!("Failed to save testcase '{}'", header.name))?;
    log::info!(
        "Downloaded and saved in={} out={}",
        infile.to_string_lossy(),
        outfile.to_string_lossy()
    );
    Ok(())
}

/// Build `program_file` and judge it against the testcases in `testcase_dir`.
pub async fn do_verify(
    program_file: impl AsRef<Path>,
    testcase_dir: impl AsRef<Path>,
    cfg: &Config,
) -> Result<Verification> {
    let program_file = program_file.as_ref();
    let testcase_dir = testcase_dir.as_ref();

    let filename = program_file
        .file_name()
        .with_context(|| format!("Not a file: {:?}", program_file))?
        .to_string_lossy();
    let builder = cfg.test.find_builder_for_filename(&filename).with_context(|| {
        format!(
            "Unconfigured build command for filename '{}' (No entry matched glob in `test.build[]`)",
            filename
        )
    })?;

    let verifier = Verifier::new(builder)
        .scratch_root(cfg.scratch_root())
        .time_limit(cfg.test.time_limit());

    let verification = verifier
        .verify(program_file, testcase_dir)
        .await
        .with_context(|| format!("Failed to verify {:?}", program_file))?;

    if verification.results.is_empty() {
        log::warn!(
            "No testcases found in {}",
            testcase_dir.to_string_lossy()
        );
    }
    style::print_summary(&verification.summary);
    Ok(verification)
}

/// Annotation -> fetch missing testcases -> verify.
pub async fn fetch_and_verify(
    provider: &dyn TestcaseProvider,
    program_file: impl AsRef<Path>,
    cfg: &Config,
) -> Result<Verification> {
    let program_file = program_file.as_ref();
    let (annotation, testcase_dir) = self::locate_testcase_dir(program_file, cfg)?;
    self::fetch_testcases(provider, &annotation.problem_url, &testcase_dir).await?;
    self::do_verify(program_file, &testcase_dir, cfg).await
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use aojv_webclient::Testcase;
    use async_trait::async_trait;

    use super::*;
    use crate::testing::Verdict;

    const PROBLEM_URL: &str = "https://judge.u-aizu.ac.jp/onlinejudge/description.jsp?id=ITP1_1_A";

    /// Serves testcases from memory; serials listed in `broken` fail.
    struct FakeProvider {
        cases: Vec<(&'static str, &'static str, &'static str)>,
        broken: Vec<u32>,
        requested: Mutex<Vec<u32>>,
    }

    impl FakeProvider {
        fn new(cases: Vec<(&'static str, &'static str, &'static str)>) -> Self {
            Self {
                cases,
                broken: Vec::new(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TestcaseProvider for FakeProvider {
        async fn fetch_testcase_headers(
            &self,
            problem_id: &ProblemId,
        ) -> aojv_webclient::Result<Vec<TestcaseHeader>> {
            assert_eq!(problem_id.as_str(), "ITP1_1_A");
            Ok(self
                .cases
                .iter()
                .enumerate()
                .map(|(i, (name, input, expected))| TestcaseHeader {
                    serial: i as u32 + 1,
                    name: name.to_string(),
                    input_size: input.len() as u64,
                    output_size: expected.len() as u64,
                    score: 0,
                })
                .collect())
        }

        async fn fetch_testcase(
            &self,
            problem_id: &ProblemId,
            serial: u32,
        ) -> aojv_webclient::Result<Testcase> {
            self.requested.lock().unwrap().push(serial);
            if self.broken.contains(&serial) {
                let e = serde_json::from_str::<Testcase>("{").unwrap_err();
                return Err(aojv_webclient::Error::Json {
                    requested_url: format!("fake/{}", serial),
                    source: e,
                });
            }
            let (_, input, expected) = self.cases[serial as usize - 1];
            Ok(Testcase {
                problem_id: problem_id.to_string(),
                serial,
                input: input.to_owned(),
                expected: expected.to_owned(),
            })
        }
    }

    #[tokio::test]
    async fn fetch_skips_cached_testcases() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FakeProvider::new(vec![("in1", "1\n", "1\n"), ("in2", "2\n", "2\n")]);

        let report = fetch_testcases(&provider, PROBLEM_URL, dir.path()).await.unwrap();
        assert_eq!(report.num_fetched, 2);
        assert_eq!(report.num_cached, 0);
        assert_eq!(fsutil::read_to_string(dir.path().join("in2.out")).unwrap(), "2\n");

        let report = fetch_testcases(&provider, PROBLEM_URL, dir.path()).await.unwrap();
        assert_eq!(report.num_fetched, 0);
        assert_eq!(report.num_cached, 2);
        assert_eq!(*provider.requested.lock().unwrap(), [1, 2]);
    }

    #[tokio::test]
    async fn fetch_tries_every_testcase_then_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut provider = FakeProvider::new(vec![
            ("in1", "1\n", "1\n"),
            ("in2", "2\n", "2\n"),
            ("in3", "3\n", "3\n"),
        ]);
        provider.broken = vec![1, 2];

        let err = fetch_testcases(&provider, PROBLEM_URL, dir.path())
            .await
            .unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("2 error(s) occurred"), "{}", msg);
        assert!(msg.contains("'in1'") && msg.contains("'in2'"), "{}", msg);
        assert_eq!(*provider.requested.lock().unwrap(), [1, 2, 3]);
        assert!(cache::is_testcase_cached(dir.path(), "in3"));
    }

    #[tokio::test]
    async fn fetch_rejects_non_aoj_url() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FakeProvider::new(vec![]);
        let url = "https://atcoder.jp/contests/abc001";
        let res = fetch_testcases(&provider, url, dir.path()).await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn fetch_and_verify_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let program_file = dir.path().join("main.sh");
        fsutil::write(
            &program_file,
            format!("#!/bin/sh\n// verification-helper: PROBLEM {PROBLEM_URL}\nread x\necho \"$x\"\n"),
        )
        .unwrap();

        let cfg = Config::from_toml(&format!(
            r#"
            work_dir = "{}"
            [[test.build]]
            pattern = "*.sh"
            command = "cp #{{sourcePath}} #{{outputPath}} && chmod +x #{{outputPath}}"
            "#,
            dir.path().join("work").to_string_lossy()
        ))
        .unwrap();

        let provider = FakeProvider::new(vec![("in1", "1\n", "1\n"), ("in2", "2\n", "x\n")]);
        let v = fetch_and_verify(&provider, &program_file, &cfg).await.unwrap();

        let verdicts: Vec<_> = v.results.iter().map(|r| r.verdict).collect();
        assert_eq!(verdicts, [Verdict::Accepted, Verdict::WrongAnswer]);

        let (_, testcase_dir) = locate_testcase_dir(&program_file, &cfg).unwrap();
        assert!(testcase_dir.starts_with(dir.path().join("work/cache")));
        assert!(cache::is_testcase_cached(&testcase_dir, "in1"));
    }

    #[tokio::test]
    async fn verify_requires_build_command() {
        let dir = tempfile::tempdir().unwrap();
        let program_file = dir.path().join("main.kt");
        fsutil::write(&program_file, "").unwrap();

        let err = do_verify(&program_file, dir.path(), &Config::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unconfigured build command"));
    }
}
