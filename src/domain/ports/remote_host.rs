//! Remote Host Port
//!
//! Abstracts shell access to the host that receives rendered files. The
//! synchronizer only needs four capabilities: run a command, run it
//! privileged, upload bytes to a path, and test whether a path exists.

use thiserror::Error;

/// Result type for remote host operations
pub type HostResult<T> = Result<T, HostError>;

/// Remote host operation errors
#[derive(Error, Debug)]
pub enum HostError {
    /// The host could not be reached (spawn failure, ssh exit 255)
    #[error("connection to {host} failed: {message}")]
    Connection { host: String, message: String },

    /// The remote command ran but exited non-zero
    #[error("command `{command}` exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    /// Local I/O while talking to the transport
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shell access to a single remote host
///
/// Implementations:
/// - `SshHost` - drives the system `ssh` binary
/// - `MemoryHost` - in-memory filesystem for tests
pub trait RemoteHost: Send + Sync {
    /// Human readable name of the host (e.g. `deploy@example.com`)
    fn display_name(&self) -> String;

    /// Run a command as the login user, returning stdout
    fn run(&self, command: &str) -> HostResult<String>;

    /// Run a command with elevated privileges, returning stdout
    fn sudo(&self, command: &str) -> HostResult<String>;

    /// Write `content` to `remote_path`, replacing any previous content
    fn put(&self, content: &[u8], remote_path: &str, elevated: bool) -> HostResult<()>;

    /// Check whether `remote_path` exists
    fn exists(&self, remote_path: &str, elevated: bool) -> HostResult<bool>;

    /// Run through `sudo` when `elevated`, otherwise through `run`
    fn execute(&self, command: &str, elevated: bool) -> HostResult<String> {
        if elevated {
            self.sudo(command)
        } else {
            self.run(command)
        }
    }
}

impl<T: RemoteHost + ?Sized> RemoteHost for &T {
    fn display_name(&self) -> String {
        (**self).display_name()
    }

    fn run(&self, command: &str) -> HostResult<String> {
        (**self).run(command)
    }

    fn sudo(&self, command: &str) -> HostResult<String> {
        (**self).sudo(command)
    }

    fn put(&self, content: &[u8], remote_path: &str, elevated: bool) -> HostResult<()> {
        (**self).put(content, remote_path, elevated)
    }

    fn exists(&self, remote_path: &str, elevated: bool) -> HostResult<bool> {
        (**self).exists(remote_path, elevated)
    }
}

impl<T: RemoteHost + ?Sized> RemoteHost for Box<T> {
    fn display_name(&self) -> String {
        (**self).display_name()
    }

    fn run(&self, command: &str) -> HostResult<String> {
        (**self).run(command)
    }

    fn sudo(&self, command: &str) -> HostResult<String> {
        (**self).sudo(command)
    }

    fn put(&self, content: &[u8], remote_path: &str, elevated: bool) -> HostResult<()> {
        (**self).put(content, remote_path, elevated)
    }

    fn exists(&self, remote_path: &str, elevated: bool) -> HostResult<bool> {
        (**self).exists(remote_path, elevated)
    }
}
