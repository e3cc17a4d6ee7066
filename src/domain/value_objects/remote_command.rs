//! Remote Command Value Object
//!
//! The shell commands the synchronizer sends to a host. Building them in one
//! place keeps quoting consistent and lets in-memory hosts interpret exactly
//! what an SSH host would receive.

/// Marker the comparison command prints before the `diff` exit status
pub const STATUS_MARKER: &str = "__bundle_sync_status=";

/// Quote a string for safe use as a single POSIX shell word
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// A command issued through `RemoteHost::run` / `RemoteHost::sudo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Unified diff of `existing` against `candidate`, followed by the exit
    /// status on a marker line. The command itself always exits 0.
    Compare { existing: String, candidate: String },
    /// Rename `from` onto `to`
    Move { from: String, to: String },
    /// Delete `path`
    Remove { path: String },
    /// Print the content of `path`
    Read { path: String },
}

impl RemoteCommand {
    /// Render as a shell command line
    pub fn to_shell(&self) -> String {
        match self {
            Self::Compare {
                existing,
                candidate,
            } => format!(
                "diff -u {} {}; echo \"{}$?\"",
                shell_quote(existing),
                shell_quote(candidate),
                STATUS_MARKER
            ),
            Self::Move { from, to } => format!("mv -f {} {}", shell_quote(from), shell_quote(to)),
            Self::Remove { path } => format!("rm -f {}", shell_quote(path)),
            Self::Read { path } => format!("cat {}", shell_quote(path)),
        }
    }

    /// Parse a command line produced by `to_shell`
    pub fn parse(command: &str) -> Option<Self> {
        let compare_suffix = format!("; echo \"{}$?\"", STATUS_MARKER);
        if let Some(diff) = command.strip_suffix(compare_suffix.as_str()) {
            return match split_words(diff)?.as_slice() {
                [cmd, flag, existing, candidate] if cmd == "diff" && flag == "-u" => {
                    Some(Self::Compare {
                        existing: existing.clone(),
                        candidate: candidate.clone(),
                    })
                }
                _ => None,
            };
        }

        match split_words(command)?.as_slice() {
            [cmd, flag, from, to] if cmd == "mv" && flag == "-f" => Some(Self::Move {
                from: from.clone(),
                to: to.clone(),
            }),
            [cmd, flag, path] if cmd == "rm" && flag == "-f" => Some(Self::Remove {
                path: path.clone(),
            }),
            [cmd, path] if cmd == "cat" => Some(Self::Read { path: path.clone() }),
            _ => None,
        }
    }
}

/// Split a shell command line into words, honouring single quotes and
/// backslash escapes. Returns `None` on an unterminated quote.
fn split_words(line: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '\'' => break,
                        q => current.push(q),
                    }
                }
            }
            '\\' => {
                in_word = true;
                current.push(chars.next()?);
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Some(words)
}
