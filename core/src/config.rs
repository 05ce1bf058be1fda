use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use aojv_webclient::AojClient;
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::testing::Builder;

/// Glob pattern deserializable from a TOML string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct GlobPattern(glob::Pattern);

impl GlobPattern {
    pub fn parse(pattern: &str) -> StdResult<Self, glob::PatternError> {
        glob::Pattern::new(pattern).map(Self)
    }

    fn must_parsed(pattern: &'static str) -> Self {
        Self::parse(pattern).expect("Failed to parse `&'static str` glob pattern")
    }

    pub fn matches(&self, s: &str) -> bool {
        self.0.matches(s)
    }
}

impl TryFrom<String> for GlobPattern {
    type Error = glob::PatternError;

    fn try_from(value: String) -> StdResult<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub work_dir: PathBuf,
    pub test: TestConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    pub shell: PathBuf,
    pub time_limit_ms: Option<u64>,
    pub build: Vec<BuildCommandConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildCommandConfig {
    pub pattern: GlobPattern,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub request_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_config_file: None,
            work_dir: PathBuf::from(".aoj-verify"),
            test: TestConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            shell: PathBuf::from("/bin/sh"),
            time_limit_ms: None,
            build: vec![BuildCommandConfig {
                pattern: GlobPattern::must_parsed("*.go"),
                command: "go build -o '#{outputPath}' '#{sourcePath}'".to_owned(),
            }],
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_interval_ms: AojClient::DEFAULT_REQUEST_INTERVAL.as_millis() as u64,
        }
    }
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "aoj-verify.toml";

    pub fn example_toml() -> anyhow::Result<String> {
        let file = Asset::get(Self::FILENAME)
            .with_context(|| format!("'{}' is not embedded", Self::FILENAME))?;
        let s = std::str::from_utf8(file.data.as_ref())
            .with_context(|| format!("'{}' is not UTF-8", Self::FILENAME))?;
        Ok(s.to_owned())
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file in ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> Option<PathBuf> {
        cur_dir
            .as_ref()
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
    }

    /// Load the nearest config file, or the defaults if there is none.
    pub fn from_file_finding_in_ancestors_or_default(
        cur_dir: impl AsRef<Path>,
    ) -> anyhow::Result<Self> {
        match Self::find_file_in_ancestors(cur_dir) {
            Some(filepath) => {
                log::debug!("Using config {}", filepath.to_string_lossy());
                Self::from_toml_file(filepath)
            }
            None => {
                log::debug!("No '{}' found; using defaults", Self::FILENAME);
                Ok(Self::default())
            }
        }
    }

    pub fn cache_root(&self) -> PathBuf {
        self.work_dir.join("cache")
    }

    pub fn scratch_root(&self) -> PathBuf {
        self.work_dir.clone()
    }
}

impl TestConfig {
    pub fn find_builder_for_filename(&self, filename: impl AsRef<str>) -> Option<Builder> {
        self.build
            .iter()
            .find(|entry| entry.pattern.matches(filename.as_ref()))
            .map(|entry| Builder::new(&entry.command).shell(&self.shell))
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

impl FetchConfig {
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn example_toml_should_be_parsable() {
        let toml = Config::example_toml().unwrap();
        let cfg = dbg!(Config::from_toml(&toml)).unwrap();

        let Config {
            source_config_file,
            work_dir,
            test,
            fetch,
        } = cfg;

        assert_eq!(source_config_file, None);
        assert_eq!(work_dir, Path::new(".aoj-verify"));
        assert_eq!(test.shell, Path::new("/bin/sh"));
        assert_eq!(test.time_limit(), None);
        assert_eq!(test.build.len(), 3);
        assert_eq!(
            test.build[0],
            BuildCommandConfig {
                pattern: GlobPattern::parse("*.go").unwrap(),
                command: "go build -o '#{outputPath}' '#{sourcePath}'".to_owned(),
            }
        );
        assert_eq!(fetch.request_interval(), Duration::from_secs(3));
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg, Config::default());
        assert!(cfg.test.find_builder_for_filename("main.go").is_some());
        assert!(cfg.test.find_builder_for_filename("main.cpp").is_none());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = Config::from_toml(
            r#"
            [test]
            time_limit_ms = 1500
            [[test.build]]
            pattern = "*.py"
            command = "cp #{sourcePath} #{outputPath}"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.work_dir, Path::new(".aoj-verify"));
        assert_eq!(cfg.test.shell, Path::new("/bin/sh"));
        assert_eq!(cfg.test.time_limit(), Some(Duration::from_millis(1500)));

        let builder = cfg.test.find_builder_for_filename("a.py").unwrap();
        assert_eq!(builder.get_template(), "cp #{sourcePath} #{outputPath}");
        assert!(cfg.test.find_builder_for_filename("a.go").is_none());
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let res = Config::from_toml(
            r#"
            [[test.build]]
            pattern = "[a"
            command = "true"
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn find_file_in_ancestors_ok() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        fsutil::mkdir_all(&nested).unwrap();
        assert_eq!(Config::find_file_in_ancestors(&nested), None);

        fsutil::write(dir.path().join("a").join(Config::FILENAME), "work_dir = \"w\"").unwrap();
        let found = Config::find_file_in_ancestors(&nested).unwrap();
        assert_eq!(found, dir.path().join("a").join(Config::FILENAME));

        let cfg = Config::from_file_finding_in_ancestors_or_default(&nested).unwrap();
        assert_eq!(cfg.work_dir, Path::new("w"));
        assert_eq!(cfg.source_config_file, Some(found));
    }
}
