//! `bundle-sync sync`: create, converge, update.

use crate::common::FakeRemote;
use crate::project;

#[test]
fn sync_creates_then_reports_unchanged() {
    let remote = FakeRemote::new();
    let env = project(&remote, "");
    let dest = remote.path("path_extension.pth");

    let first = env.run(&["sync", "path_extension.pth", &dest]);
    assert!(first.success, "{}", first.combined_output());
    assert_eq!(first.stdout, format!("[OK] created   {}\n", dest));
    assert_eq!(
        remote.read("path_extension.pth"),
        Some(format!("{}\n", remote.root().display()))
    );

    let second = env.run(&["sync", "path_extension.pth", &dest]);
    assert!(second.success, "{}", second.combined_output());
    assert_eq!(second.stdout, format!("[ ] unchanged {}\n", dest));
    assert!(remote.scratch_entries().is_empty());
}

#[test]
fn sync_replaces_stale_file() {
    let remote = FakeRemote::new();
    let env = project(&remote, "");
    remote.write("wsgi.py", "stale\n");
    let dest = remote.path("wsgi.py");

    let result = env.run(&["sync", "wsgi.py", &dest]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.starts_with("[OK] updated"));
    assert!(remote
        .read("wsgi.py")
        .unwrap()
        .contains("get_wsgi_application()"));
    assert!(remote.scratch_entries().is_empty());
}

#[test]
fn sync_json_reports_outcome() {
    let remote = FakeRemote::new();
    let env = project(&remote, "");
    let dest = remote.path("site.conf");

    let result = env.run(&["sync", "nginx.conf", &dest, "--json"]);
    assert!(result.success, "{}", result.combined_output());

    let event: serde_json::Value = serde_json::from_str(result.stdout.trim()).unwrap();
    assert_eq!(event["event"], "sync");
    assert_eq!(event["template"], "nginx.conf");
    assert_eq!(event["destination"], dest.as_str());
    assert_eq!(event["outcome"], "created");
    assert_eq!(event["changed"], true);

    let again = env.run(&["sync", "nginx.conf", &dest, "--json"]);
    let event: serde_json::Value = serde_json::from_str(again.stdout.trim()).unwrap();
    assert_eq!(event["outcome"], "unchanged");
    assert_eq!(event["changed"], false);
}

#[test]
fn sync_with_sudo() {
    let remote = FakeRemote::new();
    let env = project(&remote, "");
    let dest = remote.path("supervisor.conf");

    let result = env.run(&["sync", "supervisor.conf", &dest, "--sudo"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(remote
        .read("supervisor.conf")
        .unwrap()
        .starts_with("[program:examplecom_gunicorn]"));
}

#[test]
fn relative_destination_is_rejected_before_connecting() {
    let remote = FakeRemote::new();
    let env = project(&remote, "");

    let result = env.run(&["sync", "wsgi.py", "relative/wsgi.py"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("must be an absolute path"));
    assert!(remote.scratch_entries().is_empty());
}

#[test]
fn host_flag_overrides_config() {
    let remote = FakeRemote::new();
    let env = project(&remote, "");
    let dest = remote.path("wsgi.py");

    let result = env.run(&["--host", "ops@other.invalid", "sync", "wsgi.py", &dest]);

    assert!(result.success, "{}", result.combined_output());
    assert!(remote.read("wsgi.py").is_some());
}

#[test]
fn env_scratch_dir_must_be_valid() {
    let remote = FakeRemote::new();
    let env = project(&remote, "");
    let dest = remote.path("wsgi.py");

    let result = env.run_with_env(
        &["sync", "wsgi.py", &dest],
        &[("BUNDLE_SYNC_SCRATCH_DIR", "relative/scratch")],
    );

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("invalid scratch directory"));
    assert!(remote.read("wsgi.py").is_none());
}
