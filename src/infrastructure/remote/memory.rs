//! In-Memory Remote Host
//!
//! A `RemoteHost` backed by a map of paths to bytes. It interprets the
//! commands in `RemoteCommand` the way a POSIX host would, records every
//! operation, and can inject transport failures. Used by tests and by
//! anything that wants to exercise synchronization without a network.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use similar::TextDiff;

use crate::domain::ports::{HostError, HostResult, RemoteHost};
use crate::domain::value_objects::{RemoteCommand, STATUS_MARKER};

/// A recorded host operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Exists { path: String, elevated: bool },
    Put { path: String, elevated: bool },
    Run { command: String, elevated: bool },
}

/// Points at which the host can be told to fail with a connection error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Exists,
    Put,
    Compare,
    Move,
    Remove,
    /// Any command outside the sync protocol, such as an `on_change` hook
    Hook,
}

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<String, Vec<u8>>,
    operations: Vec<Operation>,
    faults: Vec<Fault>,
}

#[derive(Debug)]
pub struct MemoryHost {
    name: String,
    diff_available: bool,
    state: Mutex<State>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diff_available: true,
            state: Mutex::new(State::default()),
        }
    }

    /// Behave as if `diff` is not installed (exit status 127)
    pub fn without_diff(mut self) -> Self {
        self.diff_available = false;
        self
    }

    /// Builder form of `insert_file`
    pub fn with_file(self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.insert_file(path, content);
        self
    }

    pub fn insert_file(&self, path: &str, content: impl AsRef<[u8]>) {
        self.state()
            .files
            .insert(path.to_string(), content.as_ref().to_vec());
    }

    /// Raw content of `path`
    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.state().files.get(path).cloned()
    }

    /// Content of `path` as UTF-8 (lossy)
    pub fn file_string(&self, path: &str) -> Option<String> {
        self.file(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Every path currently present, sorted
    pub fn paths(&self) -> Vec<String> {
        self.state().files.keys().cloned().collect()
    }

    /// Operations recorded so far, in order
    pub fn operations(&self) -> Vec<Operation> {
        self.state().operations.clone()
    }

    pub fn clear_operations(&self) {
        self.state().operations.clear();
    }

    /// Fail every subsequent operation of this kind
    pub fn fail_on(&self, fault: Fault) {
        self.state().faults.push(fault);
    }

    pub fn clear_faults(&self) {
        self.state().faults.clear();
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_fault(&self, state: &State, fault: Fault) -> HostResult<()> {
        if state.faults.contains(&fault) {
            return Err(HostError::Connection {
                host: self.name.clone(),
                message: format!("injected {:?} failure", fault),
            });
        }
        Ok(())
    }

    fn execute_command(&self, command: &str, elevated: bool) -> HostResult<String> {
        let mut state = self.state();
        state.operations.push(Operation::Run {
            command: command.to_string(),
            elevated,
        });

        let Some(parsed) = RemoteCommand::parse(command) else {
            // Hooks and other commands have no effect on the file map.
            self.check_fault(&state, Fault::Hook)?;
            return Ok(String::new());
        };

        match parsed {
            RemoteCommand::Compare {
                existing,
                candidate,
            } => {
                self.check_fault(&state, Fault::Compare)?;
                if !self.diff_available {
                    return Ok(format!("{}127\n", STATUS_MARKER));
                }
                let (Some(old), Some(new)) =
                    (state.files.get(&existing), state.files.get(&candidate))
                else {
                    return Ok(format!("{}2\n", STATUS_MARKER));
                };
                if old == new {
                    return Ok(format!("{}0\n", STATUS_MARKER));
                }
                let old = String::from_utf8_lossy(old);
                let new = String::from_utf8_lossy(new);
                let diff = TextDiff::from_lines(old.as_ref(), new.as_ref())
                    .unified_diff()
                    .header(&existing, &candidate)
                    .to_string();
                Ok(format!("{}{}1\n", diff, STATUS_MARKER))
            }
            RemoteCommand::Move { from, to } => {
                self.check_fault(&state, Fault::Move)?;
                let content = state.files.remove(&from).ok_or_else(|| HostError::CommandFailed {
                    command: command.to_string(),
                    status: 1,
                    stderr: format!("mv: cannot stat '{}': No such file or directory", from),
                })?;
                state.files.insert(to, content);
                Ok(String::new())
            }
            RemoteCommand::Remove { path } => {
                self.check_fault(&state, Fault::Remove)?;
                state.files.remove(&path);
                Ok(String::new())
            }
            RemoteCommand::Read { path } => match state.files.get(&path) {
                Some(content) => Ok(String::from_utf8_lossy(content).into_owned()),
                None => Err(HostError::CommandFailed {
                    command: command.to_string(),
                    status: 1,
                    stderr: format!("cat: {}: No such file or directory", path),
                }),
            },
        }
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteHost for MemoryHost {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn run(&self, command: &str) -> HostResult<String> {
        self.execute_command(command, false)
    }

    fn sudo(&self, command: &str) -> HostResult<String> {
        self.execute_command(command, true)
    }

    fn put(&self, content: &[u8], remote_path: &str, elevated: bool) -> HostResult<()> {
        let mut state = self.state();
        state.operations.push(Operation::Put {
            path: remote_path.to_string(),
            elevated,
        });
        self.check_fault(&state, Fault::Put)?;
        state.files.insert(remote_path.to_string(), content.to_vec());
        Ok(())
    }

    fn exists(&self, remote_path: &str, elevated: bool) -> HostResult<bool> {
        let mut state = self.state();
        state.operations.push(Operation::Exists {
            path: remote_path.to_string(),
            elevated,
        });
        self.check_fault(&state, Fault::Exists)?;
        Ok(state.files.contains_key(remote_path))
    }
}
