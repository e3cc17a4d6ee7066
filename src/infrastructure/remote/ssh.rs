//! SSH Remote Host
//!
//! Implements `RemoteHost` by spawning the system `ssh` binary once per
//! operation. Uploads are piped through stdin, so no local temp files are
//! needed.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::domain::ports::{HostError, HostResult, RemoteHost};
use crate::domain::value_objects::shell_quote;

/// Exit status ssh itself uses for connection-level failures
const SSH_CONNECTION_FAILURE: i32 = 255;

const PRESENT: &str = "present";
const ABSENT: &str = "absent";

/// Remote host reached through `ssh`
#[derive(Debug, Clone)]
pub struct SshHost {
    /// SSH destination (user@host or host)
    destination: String,
    port: Option<u16>,
    identity: Option<PathBuf>,
    /// Extra `-o` options
    options: Vec<String>,
    connect_timeout: Option<u32>,
    /// ssh binary; `ssh` from PATH unless overridden
    program: PathBuf,
}

impl SshHost {
    /// Create a new host for the given SSH destination
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            port: None,
            identity: None,
            options: Vec::new(),
            connect_timeout: None,
            program: PathBuf::from("ssh"),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_identity(mut self, identity: impl Into<PathBuf>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Add an `-o Key=Value` option
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    pub fn with_connect_timeout(mut self, seconds: u32) -> Self {
        self.connect_timeout = Some(seconds);
        self
    }

    /// Use a different ssh binary
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Get the SSH destination
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Arguments passed to ssh for `remote_command`
    fn args(&self, remote_command: &str) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(port) = self.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        if let Some(identity) = &self.identity {
            args.push("-i".to_string());
            args.push(identity.display().to_string());
        }
        if let Some(timeout) = self.connect_timeout {
            args.push("-o".to_string());
            args.push(format!("ConnectTimeout={}", timeout));
        }
        for option in &self.options {
            args.push("-o".to_string());
            args.push(option.clone());
        }
        args.push(self.destination.clone());
        args.push(remote_command.to_string());
        args
    }

    /// Wrap a command so it runs through non-interactive sudo
    fn privileged(command: &str) -> String {
        format!("sudo -n sh -c {}", shell_quote(command))
    }

    /// Run a command on the remote host via SSH, returning stdout
    fn invoke(&self, remote_command: &str, input: Option<&[u8]>) -> HostResult<String> {
        let mut child = Command::new(&self.program)
            .args(self.args(remote_command))
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| HostError::Connection {
                host: self.destination.clone(),
                message: format!("failed to start {}: {}", self.program.display(), e),
            })?;

        let mut input_truncated = false;
        if let Some(bytes) = input {
            if let Some(mut stdin) = child.stdin.take() {
                match stdin.write_all(bytes) {
                    Ok(()) => {}
                    // The remote side stopped reading; its exit status says why.
                    Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                        tracing::debug!(host = %self.destination, "remote closed stdin early");
                        input_truncated = true;
                    }
                    Err(err) => {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(err.into());
                    }
                }
            }
        }

        let output = child.wait_with_output()?;
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        match output.status.code() {
            Some(0) if input_truncated => Err(HostError::CommandFailed {
                command: remote_command.to_string(),
                status: 0,
                stderr: "remote command exited before reading all input".to_string(),
            }),
            Some(0) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            Some(SSH_CONNECTION_FAILURE) | None => Err(HostError::Connection {
                host: self.destination.clone(),
                message: if stderr.is_empty() {
                    "ssh terminated without a status".to_string()
                } else {
                    stderr
                },
            }),
            Some(status) => Err(HostError::CommandFailed {
                command: remote_command.to_string(),
                status,
                stderr,
            }),
        }
    }
}

impl RemoteHost for SshHost {
    fn display_name(&self) -> String {
        self.destination.clone()
    }

    fn run(&self, command: &str) -> HostResult<String> {
        tracing::debug!(host = %self.destination, %command, "run");
        self.invoke(command, None)
    }

    fn sudo(&self, command: &str) -> HostResult<String> {
        tracing::debug!(host = %self.destination, %command, "sudo");
        self.invoke(&Self::privileged(command), None)
    }

    fn put(&self, content: &[u8], remote_path: &str, elevated: bool) -> HostResult<()> {
        tracing::debug!(
            host = %self.destination,
            path = remote_path,
            bytes = content.len(),
            elevated,
            "put"
        );
        let path = shell_quote(remote_path);
        let command = if elevated {
            format!("sudo -n tee {} > /dev/null", path)
        } else {
            format!("cat > {}", path)
        };
        self.invoke(&command, Some(content)).map(|_| ())
    }

    fn exists(&self, remote_path: &str, elevated: bool) -> HostResult<bool> {
        tracing::debug!(host = %self.destination, path = remote_path, elevated, "exists");
        let probe = format!(
            "if test -e {}; then echo {}; else echo {}; fi",
            shell_quote(remote_path),
            PRESENT,
            ABSENT
        );
        let command = if elevated {
            Self::privileged(&probe)
        } else {
            probe
        };
        let out = self.invoke(&command, None)?;
        match out.trim() {
            PRESENT => Ok(true),
            ABSENT => Ok(false),
            other => Err(HostError::CommandFailed {
                command,
                status: 0,
                stderr: format!("unexpected existence probe output '{}'", other),
            }),
        }
    }
}
