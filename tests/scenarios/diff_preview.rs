//! `bundle-sync diff`: preview without writing.

use crate::common::FakeRemote;
use crate::project;

#[test]
fn diff_against_missing_file_shows_new_file() {
    let remote = FakeRemote::new();
    let env = project(&remote, "");
    let dest = remote.path("wsgi.py");

    let result = env.run(&["diff", "wsgi.py", &dest]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("(new file, 8 lines)"), "{}", result.stdout);
    assert!(result.stdout.contains("+import os"));
    assert!(remote.read("wsgi.py").is_none());
    assert!(remote.scratch_entries().is_empty());
}

#[test]
fn diff_shows_changed_lines() {
    let remote = FakeRemote::new();
    let env = project(&remote, "");
    remote.write("path_extension.pth", "/old/root\n");
    let dest = remote.path("path_extension.pth");

    let result = env.run(&["diff", "path_extension.pth", &dest]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("(+1, -1)"), "{}", result.stdout);
    assert!(result.stdout.contains("-/old/root"));
    assert!(result
        .stdout
        .contains(&format!("+{}", remote.root().display())));
    assert_eq!(remote.read("path_extension.pth").as_deref(), Some("/old/root\n"));
}

#[test]
fn diff_up_to_date() {
    let remote = FakeRemote::new();
    let env = project(&remote, "");
    let dest = remote.path("path_extension.pth");

    let synced = env.run(&["sync", "path_extension.pth", &dest]);
    assert!(synced.success, "{}", synced.combined_output());

    let result = env.run(&["diff", "path_extension.pth", &dest]);
    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("is up to date"), "{}", result.stdout);
}
