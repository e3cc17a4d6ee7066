//! Property tests for the synchronizer against the in-memory host.

use proptest::prelude::*;

use bundle_sync::domain::value_objects::{Context, SyncOutcome};
use bundle_sync::infrastructure::templates::TemplateSource;
use bundle_sync::{HandlebarsRenderer, MemoryHost, TemplateSynchronizer};

const DEST: &str = "/srv/site/conf/app.conf";

fn renderer() -> HandlebarsRenderer {
    let mut renderer = HandlebarsRenderer::new();
    renderer
        .register(
            "app.conf",
            "name = {{name}}\n{{#each values}}value = {{this}}\n{{/each}}",
            TemplateSource::Inline,
        )
        .unwrap();
    renderer
}

fn context(name: &str, values: &[String]) -> Context {
    Context::new()
        .with("name", name)
        .with("values", serde_json::json!(values))
}

fn rendered(name: &str, values: &[String]) -> String {
    let mut out = format!("name = {}\n", name);
    for v in values {
        out.push_str(&format!("value = {}\n", v));
    }
    out
}

fn value() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _./:-]{0,24}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: sync twice with the same context -> changed, then unchanged.
    #[test]
    fn property_second_sync_reports_no_change(
        name in value(),
        values in proptest::collection::vec(value(), 0..6),
        existing in proptest::option::of("(?s).{0,64}"),
    ) {
        let host = MemoryHost::new();
        if let Some(existing) = &existing {
            host.insert_file(DEST, existing);
        }
        let sync = TemplateSynchronizer::new(&host, renderer());
        let ctx = context(&name, &values);
        let expected = rendered(&name, &values);

        let first = sync.sync(&ctx, "app.conf", DEST, false).unwrap();
        let expected_first = match &existing {
            None => SyncOutcome::Created,
            Some(e) if *e == expected => SyncOutcome::Unchanged,
            Some(_) => SyncOutcome::Updated,
        };
        prop_assert_eq!(first, expected_first);

        let second = sync.sync(&ctx, "app.conf", DEST, false).unwrap();
        prop_assert_eq!(second, SyncOutcome::Unchanged);
        prop_assert_eq!(host.file_string(DEST), Some(expected));
    }

    /// PROPERTY: after any successful sync only the destination remains.
    #[test]
    fn property_no_artifacts_remain(
        names in proptest::collection::vec(value(), 1..5),
    ) {
        let host = MemoryHost::new();
        let sync = TemplateSynchronizer::new(&host, renderer());

        for name in &names {
            sync.sync(&context(name, &[]), "app.conf", DEST, false).unwrap();
            prop_assert_eq!(host.paths(), vec![DEST.to_string()]);
        }
    }

    /// PROPERTY: `changed` tracks whether the content actually moved.
    #[test]
    fn property_changed_iff_content_differs(a in value(), b in value()) {
        let host = MemoryHost::new();
        let sync = TemplateSynchronizer::new(&host, renderer());

        sync.sync(&context(&a, &[]), "app.conf", DEST, false).unwrap();
        let outcome = sync.sync(&context(&b, &[]), "app.conf", DEST, false).unwrap();

        prop_assert_eq!(outcome.changed(), a != b);
    }
}
