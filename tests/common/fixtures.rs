//! Reusable test content

/// A one-line template used across scenarios
pub const GREETING_TEMPLATE: &str = "hello, {{name}}\n";

/// Minimal project config for CLI tests, without a host
pub const PROJECT_CONFIG: &str = r#"
[context]
http_host = "example.com"
bundle_root = "/home/deploy/bundles/example.com"
user = "deploy"
"#;
