//! End-to-end tests: manifest on disk -> scope tree -> evaluated bindings

use expect_test::expect;
use lm_eval::{Env, Rule};
use lm_integration_tests::{TestFixture, fixture_path, load_fixture};
use lm_manifest::{LoadedManifest, ManifestError, ROOT_SCOPE};

fn binding(loaded: &LoadedManifest, scope: &str, key: &str) -> String {
    let scope = loaded.scope(scope).expect("scope not found");
    loaded
        .evaluate_binding(scope, key)
        .expect("evaluation failed")
}

#[test]
fn test_compile_edges_use_rule_defaults() {
    let loaded = load_fixture("compile.toml").expect("fixture should load");

    expect!["gcc -MMD -MF out/main.o.d -Wall -O2 -c src/main.c -o out/main.o"]
        .assert_eq(&binding(&loaded, "main", "command"));
    assert_eq!(binding(&loaded, "main", "depfile"), "out/main.o.d");
    assert_eq!(binding(&loaded, "main", "description"), "CC out/main.o");
    assert_eq!(binding(&loaded, "main", "deps"), "gcc");
}

#[test]
fn test_edge_variables_shadow_globals() {
    let loaded = load_fixture("compile.toml").expect("fixture should load");

    expect!["gcc -MMD -MF out/util.o.d -Wall -O2 -fPIC -c src/util.c -o out/util.o"]
        .assert_eq(&binding(&loaded, "util", "command"));

    let root = loaded.scope(ROOT_SCOPE).expect("root scope");
    assert_eq!(
        loaded.tree().env(root).lookup_variable("cflags"),
        "-Wall -O2"
    );
}

#[test]
fn test_edge_binding_overrides_rule_default() {
    let loaded = load_fixture("compile.toml").expect("fixture should load");

    assert_eq!(binding(&loaded, "app", "description"), "LINK (custom) out/app");
    // `ldflags` is never bound, so it expands to nothing.
    assert_eq!(
        binding(&loaded, "app", "command"),
        "gcc  -o out/app out/main.o out/util.o"
    );
}

#[test]
fn test_root_rule_table() {
    let loaded = load_fixture("compile.toml").expect("fixture should load");
    let tree = loaded.tree();
    let rules = tree.env(tree.root()).rules();

    let names: Vec<_> = rules.keys().map(String::as_str).collect();
    assert_eq!(names, ["cc", "link"]);

    let main = loaded.scope("main").expect("main scope");
    assert!(tree.env(main).rules().is_empty());
}

#[test]
fn test_nested_scope_uses_shadowing_rule() {
    let loaded = load_fixture("nested.toml").expect("fixture should load");

    let doc = loaded.scope("doc").expect("doc scope");
    let pool = loaded
        .edge_rule(doc)
        .and_then(|rule| rule.binding("pool"))
        .map(|pool| pool.serialize());
    assert_eq!(pool.as_deref(), Some("[console]"));
    assert_eq!(
        binding(&loaded, "doc", "command"),
        "install -m644 README /usr/local/share/doc/README"
    );
    assert_eq!(binding(&loaded, "doc", "description"), "INSTALL share/doc/README");
    assert_eq!(binding(&loaded, "doc", "pool"), "console");
}

#[test]
fn test_sibling_scope_keeps_parent_rule() {
    let loaded = load_fixture("nested.toml").expect("fixture should load");

    assert_eq!(binding(&loaded, "bin", "command"), "cp app /usr/bin/app");
    assert_eq!(binding(&loaded, "bin", "description"), "");

    let tree = loaded.tree();
    let root_install = tree.env(tree.root()).lookup_rule("install");
    expect!["[$tool][ ][$in][ ][$prefix][/][$out]"].assert_eq(
        &root_install
            .and_then(|rule| rule.binding("command"))
            .map(|command| command.serialize())
            .unwrap_or_default(),
    );
    assert_eq!(root_install.map(Rule::name), Some("install"));
}

#[test]
fn test_bad_template_fixture() {
    let err = lm_manifest::load_file(&fixture_path("bad_template.toml"))
        .expect_err("fixture should not load");

    assert_eq!(err.to_string(), "invalid template in `rules.cc.command`");
    assert!(matches!(err, ManifestError::Template { .. }));
}

#[test]
fn test_manifest_written_at_runtime() {
    let mut fixture = TestFixture::new().expect("tempdir");
    let loaded = fixture
        .load(
            "loom.toml",
            r#"
[rules.echo]
command = "echo $msg"

[scopes.hello]
rule = "echo"
vars = { msg = "hello $$USER" }
"#,
        )
        .expect("manifest should load");

    assert_eq!(binding(&loaded, "hello", "command"), "echo hello $USER");
    assert_eq!(fixture.files.len(), 1);
}

#[test]
fn test_scope_declared_before_parent_is_rejected() {
    let mut fixture = TestFixture::new().expect("tempdir");
    let err = fixture
        .load(
            "loom.toml",
            "[scopes.child]\nparent = \"later\"\n\n[scopes.later]\n",
        )
        .expect_err("manifest should not load");

    expect!["scope `child` names unknown parent `later`"].assert_eq(&err.to_string());
}
