//! Built-in templates, compiled into the binary.
//!
//! Template files in `templates/` and the entries below must stay in sync;
//! the `include_str!` paths are checked at compile time.

pub const NGINX_CONF: &str = include_str!("../../../templates/nginx.conf.hbs");
pub const SUPERVISOR_CONF: &str = include_str!("../../../templates/supervisor.conf.hbs");
pub const SETTINGS_PY: &str = include_str!("../../../templates/settings.py.hbs");
pub const WSGI_PY: &str = include_str!("../../../templates/wsgi.py.hbs");
pub const PATH_EXTENSION_PTH: &str = include_str!("../../../templates/path_extension.pth.hbs");

/// `(name, text)` pairs for every built-in template
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("nginx.conf", NGINX_CONF),
    ("supervisor.conf", SUPERVISOR_CONF),
    ("settings.py", SETTINGS_PY),
    ("wsgi.py", WSGI_PY),
    ("path_extension.pth", PATH_EXTENSION_PTH),
];
