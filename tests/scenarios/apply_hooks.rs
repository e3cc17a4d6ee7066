//! `bundle-sync apply`: every managed file, hooks only on change.

use crate::common::FakeRemote;
use crate::project;

fn files(remote: &FakeRemote) -> String {
    format!(
        r#"
[[files]]
template = "wsgi.py"
destination = "{wsgi}"
on_change = ["echo wsgi >> '{log}'"]

[[files]]
template = "supervisor.conf"
destination = "{supervisor}"
elevated = true
on_change = ["sudo echo supervisor >> '{log}'"]
"#,
        wsgi = remote.path("wsgi.py"),
        supervisor = remote.path("supervisor.conf"),
        log = remote.dir.path().join("hooks.log").display(),
    )
}

fn hook_log(remote: &FakeRemote) -> String {
    std::fs::read_to_string(remote.dir.path().join("hooks.log")).unwrap_or_default()
}

#[test]
fn apply_syncs_all_files_and_runs_hooks_once() {
    let remote = FakeRemote::new();
    let env = project(&remote, &files(&remote));

    let first = env.run(&["apply"]);
    assert!(first.success, "{}", first.combined_output());
    assert!(first.stdout.contains(&format!("[OK] created   {}", remote.path("wsgi.py"))));
    assert!(first.stdout.contains("  [>] sudo echo supervisor"));
    assert!(first.stdout.ends_with("2 files, 2 changed\n"), "{}", first.stdout);
    assert_eq!(hook_log(&remote), "wsgi\nsupervisor\n");

    let second = env.run(&["apply"]);
    assert!(second.success, "{}", second.combined_output());
    assert!(second.stdout.ends_with("2 files, 0 changed\n"), "{}", second.stdout);
    assert!(!second.stdout.contains("[>]"));
    assert_eq!(hook_log(&remote), "wsgi\nsupervisor\n");
    assert!(remote.scratch_entries().is_empty());
}

#[test]
fn apply_runs_hooks_only_for_changed_file() {
    let remote = FakeRemote::new();
    let env = project(&remote, &files(&remote));

    assert!(env.run(&["apply"]).success);
    remote.write("supervisor.conf", "edited by hand\n");

    let result = env.run(&["apply"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.ends_with("2 files, 1 changed\n"), "{}", result.stdout);
    assert_eq!(hook_log(&remote), "wsgi\nsupervisor\nsupervisor\n");
}

#[test]
fn apply_json_emits_file_and_summary_events() {
    let remote = FakeRemote::new();
    let env = project(&remote, &files(&remote));

    let result = env.run(&["apply", "--json"]);
    assert!(result.success, "{}", result.combined_output());

    let events: Vec<serde_json::Value> = result
        .stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["event"], "file");
    assert_eq!(events[0]["template"], "wsgi.py");
    assert_eq!(events[0]["outcome"], "created");
    assert_eq!(events[1]["destination"], remote.path("supervisor.conf").as_str());
    assert_eq!(events[2]["event"], "summary");
    assert_eq!(events[2]["files"], 2);
    assert_eq!(events[2]["changed"], 2);
}

#[test]
fn failing_hook_stops_apply() {
    let remote = FakeRemote::new();
    let config = format!(
        r#"
[[files]]
template = "wsgi.py"
destination = "{wsgi}"
on_change = ["exit 4"]

[[files]]
template = "path_extension.pth"
destination = "{pth}"
"#,
        wsgi = remote.path("wsgi.py"),
        pth = remote.path("path_extension.pth"),
    );
    let env = project(&remote, &config);

    let result = env.run(&["apply"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("on_change hook 'exit 4'"), "{}", result.stderr);
    assert!(remote.read("wsgi.py").is_some());
    assert!(remote.read("path_extension.pth").is_none());
}

#[test]
fn apply_without_files_is_an_error() {
    let remote = FakeRemote::new();
    let env = project(&remote, "");

    let result = env.run(&["apply"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("no [[files]] entries"));
}

#[test]
fn run_hooks_recovers_from_a_failed_reload() {
    let remote = FakeRemote::new();
    let ready = remote.dir.path().join("nginx-ready");
    let log = remote.dir.path().join("hooks.log");
    let config = format!(
        r#"
[[files]]
template = "nginx.conf"
destination = "{nginx}"
on_change = ["test -e '{ready}'", "echo reload >> '{log}'"]
"#,
        nginx = remote.path("nginx.conf"),
        ready = ready.display(),
        log = log.display(),
    );
    let env = project(&remote, &config);

    let failed = env.run(&["apply"]);
    assert_eq!(failed.exit_code, 1);
    assert!(remote.read("nginx.conf").is_some());
    assert!(failed.stderr.contains(&format!("not run: test -e '{}'", ready.display())));
    assert!(failed.stderr.contains("not run: echo reload"), "{}", failed.stderr);
    assert!(failed.stderr.contains("apply --run-hooks"), "{}", failed.stderr);

    std::fs::write(&ready, "").unwrap();

    let plain = env.run(&["apply"]);
    assert!(plain.success, "{}", plain.combined_output());
    assert!(plain.stdout.ends_with("1 files, 0 changed\n"), "{}", plain.stdout);
    assert_eq!(hook_log(&remote), "");

    let forced = env.run(&["apply", "--run-hooks"]);
    assert!(forced.success, "{}", forced.combined_output());
    assert!(forced.stdout.contains("[ ] unchanged"), "{}", forced.stdout);
    assert!(forced.stdout.contains("  [>] echo reload"));
    assert_eq!(hook_log(&remote), "reload\n");
}
