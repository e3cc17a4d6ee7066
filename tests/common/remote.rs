//! A fake remote host for end-to-end tests.
//!
//! `FakeRemote` writes an `ssh` script that ignores its options and runs the
//! remote command with the local `sh`, plus a `sudo` that drops `-n` and runs
//! the rest unprivileged. Every remote path in a test lives under `root`.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct FakeRemote {
    pub dir: TempDir,
}

impl FakeRemote {
    pub fn new() -> Self {
        let remote = Self {
            dir: TempDir::new().unwrap(),
        };
        fs::create_dir_all(remote.bin_dir()).unwrap();
        fs::create_dir_all(remote.root()).unwrap();
        fs::create_dir_all(remote.scratch()).unwrap();

        let bin = remote.bin_dir();
        write_script(
            &bin.join("ssh"),
            &format!(
                "#!/bin/sh\nfor last; do :; done\nPATH=\"{}:$PATH\" exec sh -c \"$last\"\n",
                bin.display()
            ),
        );
        write_script(
            &bin.join("sudo"),
            "#!/bin/sh\n[ \"$1\" = \"-n\" ] && shift\nexec \"$@\"\n",
        );
        remote
    }

    /// Directory holding the fake `ssh` and `sudo`
    pub fn bin_dir(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    pub fn ssh_program(&self) -> PathBuf {
        self.bin_dir().join("ssh")
    }

    /// Stand-in for the remote filesystem
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("remote")
    }

    /// Scratch directory on the fake remote
    pub fn scratch(&self) -> PathBuf {
        self.dir.path().join("scratch")
    }

    /// Absolute remote path for `relative`
    pub fn path(&self, relative: &str) -> String {
        self.root().join(relative).display().to_string()
    }

    pub fn read(&self, relative: &str) -> Option<String> {
        fs::read_to_string(self.root().join(relative)).ok()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Names of files currently in the scratch directory
    pub fn scratch_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.scratch())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}
