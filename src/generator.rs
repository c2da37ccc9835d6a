use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use log::{info, warn};
use tokio::process::Command;

/// External project generator (premake and friends). Its output is inherited
/// and its exit status is reported back untouched.
#[derive(Debug, Clone)]
pub struct ProjectGenerator {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl ProjectGenerator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    pub async fn run(&self) -> io::Result<ExitStatus> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        info!("Running {}", self.command_line());
        let status = command.status().await?;
        if status.success() {
            info!("{} finished", self.program);
        } else {
            warn!("{} exited with {}", self.program, status);
        }
        Ok(status)
    }
}

/// Process exit code to hand on for a finished generator. Codes that do not
/// fit a byte (Windows NTSTATUS crashes) and signal terminations become 1,
/// and a failed run never maps to 0.
pub fn exit_code(status: &ExitStatus) -> u8 {
    exit_code_from(status.code(), status.success())
}

fn exit_code_from(code: Option<i32>, success: bool) -> u8 {
    if success {
        return 0;
    }
    match code.and_then(|code| u8::try_from(code).ok()) {
        Some(code) if code != 0 => code,
        _ => 1,
    }
}

#[cfg(test)]
mod test {
    use crate::generator::{exit_code_from, ProjectGenerator};

    #[test]
    fn test_command_line() {
        let generator = ProjectGenerator::new("premake5").args(["vs2022", "--verbose"]);
        assert_eq!(generator.command_line(), "premake5 vs2022 --verbose");
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code_from(Some(0), true), 0);
        assert_eq!(exit_code_from(Some(3), false), 3);
        assert_eq!(exit_code_from(Some(255), false), 255);
        // access violation on Windows
        assert_eq!(exit_code_from(Some(0xC0000005u32 as i32), false), 1);
        assert_eq!(exit_code_from(Some(-1), false), 1);
        assert_eq!(exit_code_from(Some(256), false), 1);
        // killed by a signal
        assert_eq!(exit_code_from(None, false), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_code_of_failed_run() {
        let status = ProjectGenerator::new("sh").arg("-c").arg("exit 7").run().await.unwrap();
        assert_eq!(crate::generator::exit_code(&status), 7);

        let status = ProjectGenerator::new("sh").arg("-c").arg("kill -9 $$").run().await.unwrap();
        assert_eq!(crate::generator::exit_code(&status), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_is_reported() {
        let ok = ProjectGenerator::new("sh").arg("-c").arg("exit 0").run().await.unwrap();
        assert!(ok.success());

        let failed = ProjectGenerator::new("sh").arg("-c").arg("exit 3").run().await.unwrap();
        assert_eq!(failed.code(), Some(3));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let status = ProjectGenerator::new("sh")
            .args(["-c", "touch generated.marker"])
            .working_dir(dir.path())
            .run()
            .await
            .unwrap();
        assert!(status.success());
        assert!(dir.path().join("generated.marker").exists());
    }

    #[tokio::test]
    async fn test_missing_program() {
        let result = ProjectGenerator::new("definitely-not-a-generator-binary").run().await;
        assert!(result.is_err());
    }
}
