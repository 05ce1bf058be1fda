use std::{
    collections::HashMap,
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
    process::Stdio,
};

use tokio::process::Command;

use crate::str_interp::{interp, InterpError};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Invalid build command template '{template}': {source}")]
    Template {
        template: String,

        #[source]
        source: InterpError,
    },

    #[error("Failed to spawn '{shell} -c {cmd}': {source}")]
    Spawn {
        shell: String,
        cmd: String,

        #[source]
        source: io::Error,
    },

    #[error("Compile error ({}):\n{diagnostics}", exit_description(.exit_code))]
    Failed {
        exit_code: Option<i32>,
        diagnostics: String,
    },
}

fn exit_description(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("exitcode={}", code),
        None => "terminated by signal".to_owned(),
    }
}

/// Runs a toolchain command through a shell to turn one source file into one executable.
#[derive(Debug, Clone)]
pub struct Builder {
    template: String,
    shell: PathBuf,
}

impl Builder {
    const DEFAULT_SHELL: &str = "/bin/sh";

    /// `template` may refer to `#{sourcePath}`, `#{sourceDir}`, `#{sourceName}`,
    /// `#{sourceStem}` and `#{outputPath}`.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            shell: Self::DEFAULT_SHELL.into(),
        }
    }

    pub fn shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn get_template(&self) -> &str {
        &self.template
    }

    fn make_interp_vars<'a>(
        source: &'a Path,
        output: &'a Path,
    ) -> HashMap<&'static str, &'a OsStr> {
        let mut m: HashMap<_, &OsStr> = HashMap::new();
        m.insert("sourcePath", source.as_os_str());
        m.insert("sourceName", source.file_name().unwrap_or(source.as_os_str()));
        m.insert(
            "sourceDir",
            source.parent().unwrap_or(Path::new(".")).as_os_str(),
        );
        m.insert(
            "sourceStem",
            source
                .file_stem()
                .unwrap_or(OsStr::new("UNDEFINED_FILE_STEM")),
        );
        m.insert("outputPath", output.as_os_str());
        m
    }

    pub fn render_command(&self, source: &Path, output: &Path) -> Result<String, BuildError> {
        let vars = Self::make_interp_vars(source, output);
        interp(&self.template, &vars).map_err(|e| BuildError::Template {
            template: self.template.clone(),
            source: e,
        })
    }

    /// Build `source` into an executable at `output`.
    /// On failure the toolchain's stderr is returned as is.
    pub async fn build(&self, source: &Path, output: &Path) -> Result<(), BuildError> {
        let cmd = self.render_command(source, output)?;
        log::info!("Building {}", source.to_string_lossy());
        log::debug!("{}", cmd);

        let out = Command::new(&self.shell)
            .args(["-c", &cmd])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| BuildError::Spawn {
                shell: self.shell.to_string_lossy().into_owned(),
                cmd: cmd.clone(),
                source: e,
            })?;

        if out.status.success() {
            Ok(())
        } else {
            Err(BuildError::Failed {
                exit_code: out.status.code(),
                diagnostics: String::from_utf8_lossy(&out.stderr).into_owned(),
            })
        }
    }
}
