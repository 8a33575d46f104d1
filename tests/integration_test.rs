use clap::Parser;
use gp_ast::{
    annotation::HttpMethod,
    cli::{self, CliArgs},
    collector,
    config::GeneratorConfig,
    emitter::{self, api_def::ApiDefinition},
    error::GenError,
    parser::AstParser,
    registry::RegistrySnapshot,
    scanner::FileScanner,
    serializer::{serialize_json, serialize_yaml},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::ffi::OsString;
use std::fs;
use tempfile::TempDir;

/// Helper function to create a temporary test project
fn create_test_project(files: Vec<(&str, &str)>) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    for (path, content) in files {
        let file_path = temp_dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
    }

    temp_dir
}

/// Runs scan, parse and collection the way the command-line tool does.
fn generate(
    temp_dir: &TempDir,
    scan_pkg: &str,
    context: &str,
) -> anyhow::Result<(GeneratorConfig, RegistrySnapshot)> {
    let config = GeneratorConfig::new(temp_dir.path(), scan_pkg, "", context)?;
    let scanner = FileScanner::from_config(&config);
    let scan_result = scanner.scan()?;
    let parsed_files = AstParser::parse_files(&scan_result.rust_files)?;
    let snapshot = collector::collect(&config, &parsed_files)?.finalize();
    Ok((config, snapshot))
}

fn run_cli(temp_dir: &TempDir) -> anyhow::Result<()> {
    let args = CliArgs::try_parse_from([
        OsString::from("gp-ast"),
        OsString::from("--project-dir"),
        temp_dir.path().as_os_str().to_os_string(),
    ])?;
    cli::run(args)
}

fn user_project() -> TempDir {
    create_test_project(vec![
        ("src/main.rs", "mod api;\nmod service;\nfn main() {}\n"),
        ("src/api/mod.rs", "pub mod user;\n"),
        ("src/api/user.rs", include_str!("fixtures/user_controller.rs")),
        ("src/service.rs", include_str!("fixtures/user_service.rs")),
    ])
}

/// Names a file brings into scope through its top-level `use` items.
fn top_level_use_names(file: &syn::File) -> Vec<String> {
    fn walk(tree: &syn::UseTree, names: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => walk(&path.tree, names),
            syn::UseTree::Name(name) => names.push(name.ident.to_string()),
            syn::UseTree::Rename(rename) => names.push(rename.rename.to_string()),
            syn::UseTree::Group(group) => group.items.iter().for_each(|item| walk(item, names)),
            syn::UseTree::Glob(_) => {}
        }
    }

    let mut names = Vec::new();
    for item in &file.items {
        if let syn::Item::Use(item_use) = item {
            walk(&item_use.tree, &mut names);
        }
    }
    names
}

fn routes(snapshot: &RegistrySnapshot, ctrl: &str) -> Vec<(HttpMethod, String, String)> {
    snapshot.controllers()[ctrl]
        .routes
        .iter()
        .map(|r| (r.method, r.path.clone(), r.name.clone()))
        .collect()
}

#[test]
fn test_user_controller_end_to_end() {
    let temp_dir = user_project();
    let (config, snapshot) = generate(&temp_dir, ".", "/api").expect("generation failed");

    assert_eq!(
        snapshot.beans().keys().collect::<Vec<_>>(),
        vec!["AuditLog", "UserCtrl", "UserService"]
    );
    assert_eq!(snapshot.controllers().keys().collect::<Vec<_>>(), vec!["UserCtrl"]);
    assert_eq!(
        routes(&snapshot, "UserCtrl"),
        vec![
            (HttpMethod::Get, "/api/users/all".to_string(), "list".to_string()),
            (HttpMethod::Get, "/api/users/detail".to_string(), "detail".to_string()),
            (HttpMethod::Post, "/api/users".to_string(), "create".to_string()),
        ]
    );
    assert_eq!(snapshot.annotations()["/api/users/detail"]["@Auth"], "admin");
    assert_eq!(snapshot.annotations().len(), 1);

    let written = emitter::emit(&snapshot, &config.project_root).expect("emission failed");
    assert_eq!(written.len(), 2);

    let init = fs::read_to_string(temp_dir.path().join("gp_bean_init.rs")).unwrap();
    assert!(init.contains("use crate::api::user::{AuditLog, UserCtrl};"));
    assert!(init.contains("use crate::service::UserService;"));
    assert!(init.contains("gin_plus::ioc::register(UserService::default());"));
    assert!(init.contains("gin_plus::mvc::set_annotations("));
    assert!(init.contains(r#"("@Auth", "admin")"#));
    assert!(syn::parse_file(&init).is_ok());

    let def = fs::read_to_string(temp_dir.path().join("gp_api.def")).unwrap();
    let definition = ApiDefinition::decode(&def).unwrap();
    assert_eq!(definition.ctrl["UserCtrl"].routes.len(), 3);
    assert_eq!(definition.annotation["/api/users/detail"]["@Auth"], "admin");
}

#[test]
fn test_initializer_fits_a_crate_root_that_imports_a_bean() {
    let temp_dir = user_project();
    let (config, snapshot) = generate(&temp_dir, ".", "/").unwrap();
    emitter::emit(&snapshot, &config.project_root).unwrap();

    // Splice the initializer in where the crate root's include! would put it
    let init = fs::read_to_string(temp_dir.path().join("gp_bean_init.rs")).unwrap();
    let crate_root = format!(
        "mod api;\nmod service;\nuse api::user::UserCtrl;\n{}\nfn main() {{ gp_init(); }}\n",
        init
    );
    let file = syn::parse_file(&crate_root).unwrap();

    assert_eq!(top_level_use_names(&file), vec!["UserCtrl"]);
}

#[test]
fn test_bean_under_cargo_test_dir_is_not_scanned() {
    let temp_dir = create_test_project(vec![
        ("src/main.rs", include_str!("fixtures/ping_main.rs")),
        (
            "tests/api_support.rs",
            "use gin_plus::ioc;\n#[derive(Default)]\npub struct MockRepo(ioc::Bean);\n",
        ),
        (
            "examples/demo.rs",
            "use gin_plus::ioc;\npub struct DemoRepo(ioc::Bean);\nfn main() {}\n",
        ),
        ("build.rs", "use gin_plus::ioc;\npub struct BuildRepo(ioc::Bean);\nfn main() {}\n"),
    ]);

    run_cli(&temp_dir).expect("test and example crates must not abort the run");

    let init = fs::read_to_string(temp_dir.path().join("gp_bean_init.rs")).unwrap();
    assert!(init.contains("PingCtrl"));
    assert!(!init.contains("MockRepo"));
    assert!(!init.contains("DemoRepo"));
    assert!(!init.contains("BuildRepo"));
}

#[test]
fn test_default_base_path_and_context() {
    let temp_dir =
        create_test_project(vec![("src/main.rs", include_str!("fixtures/ping_main.rs"))]);
    let (config, snapshot) = generate(&temp_dir, ".", "/").unwrap();

    assert_eq!(
        routes(&snapshot, "PingCtrl"),
        vec![(HttpMethod::Get, "/ping".to_string(), "ping".to_string())]
    );

    emitter::emit(&snapshot, &config.project_root).unwrap();
    let init = fs::read_to_string(temp_dir.path().join("gp_bean_init.rs")).unwrap();
    assert!(!init.contains("use "));
    assert!(!init.contains("set_annotations"));
}

#[rstest]
#[case("/", "/api/users")]
#[case("/all/", "/api/users/all")]
#[case("//all", "/api/users/all")]
fn test_method_path_is_cleaned(#[case] method_path: &str, #[case] expected: &str) {
    let code = format!(
        r#"
            use gin_plus::mvc;

            /// @BasePath("/users")
            pub struct UserCtrl(mvc::Controller);

            impl UserCtrl {{
                /// @GET(path="{}")
                pub fn index(&self) {{}}
            }}
        "#,
        method_path
    );
    let temp_dir = create_test_project(vec![("src/lib.rs", &code)]);
    let (_, snapshot) = generate(&temp_dir, ".", "api").unwrap();

    assert_eq!(snapshot.controllers()["UserCtrl"].routes[0].path, expected);
}

#[test]
fn test_controller_and_bean_marker_counts_once() {
    let temp_dir = create_test_project(vec![(
        "src/lib.rs",
        r#"
            use gin_plus::{ioc, mvc};

            pub struct Both {
                bean: ioc::Bean,
                ctrl: mvc::Controller,
            }
        "#,
    )]);
    let (_, snapshot) = generate(&temp_dir, ".", "/").unwrap();

    assert_eq!(snapshot.beans().len(), 1);
    assert_eq!(snapshot.controllers().len(), 1);
    assert!(snapshot.controllers().contains_key("Both"));
}

#[test]
fn test_route_order_follows_source_not_file_order() {
    // The impl block sorts before the struct declaration
    let temp_dir = create_test_project(vec![
        (
            "src/a_routes.rs",
            r#"
                use gin_plus::mvc;
                use crate::z_ctrl::OrderCtrl;

                impl OrderCtrl {
                    /// @GET(path="/m1")
                    pub fn m1(&self) {}
                    /// @GET(path="/m2")
                    pub fn m2(&self) {}
                    /// @GET(path="/m3")
                    pub fn m3(&self) {}
                }
            "#,
        ),
        (
            "src/z_ctrl.rs",
            r#"
                use gin_plus::mvc;

                pub struct OrderCtrl(mvc::Controller);
            "#,
        ),
    ]);
    let (_, snapshot) = generate(&temp_dir, ".", "/").unwrap();

    let names: Vec<_> = routes(&snapshot, "OrderCtrl").into_iter().map(|r| r.2).collect();
    assert_eq!(names, vec!["m1", "m2", "m3"]);
}

#[test]
fn test_methods_on_non_controllers_are_ignored() {
    let temp_dir = user_project();
    let (_, snapshot) = generate(&temp_dir, ".", "/").unwrap();

    // UserService::names carries a route annotation but UserService is only a bean
    assert!(snapshot
        .controllers()
        .values()
        .flat_map(|c| &c.routes)
        .all(|r| r.name != "names"));
}

#[test]
fn test_duplicate_struct_names_write_nothing() {
    let bean = "use gin_plus::ioc;\n#[derive(Default)]\npub struct Repo(ioc::Bean);\n";
    let temp_dir = create_test_project(vec![("src/a.rs", bean), ("src/b.rs", bean)]);

    let err = run_cli(&temp_dir).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GenError>(),
        Some(GenError::DuplicateStruct { name, .. }) if name == "Repo"
    ));
    assert!(!temp_dir.path().join("gp_bean_init.rs").exists());
    assert!(!temp_dir.path().join("gp_api.def").exists());
}

#[test]
fn test_syntax_error_aborts_the_run() {
    let temp_dir = create_test_project(vec![
        ("src/main.rs", include_str!("fixtures/ping_main.rs")),
        ("src/broken.rs", "pub fn broken( {"),
    ]);

    let err = run_cli(&temp_dir).unwrap_err();
    assert!(matches!(err.downcast_ref::<GenError>(), Some(GenError::Parse { .. })));
    assert!(!temp_dir.path().join("gp_bean_init.rs").exists());
}

#[test]
fn test_scan_pkg_limits_the_scan() {
    let temp_dir = user_project();
    let (_, snapshot) = generate(&temp_dir, "src/api", "/").unwrap();

    assert_eq!(
        snapshot.beans().keys().collect::<Vec<_>>(),
        vec!["AuditLog", "UserCtrl"]
    );
}

#[test]
fn test_no_markers_writes_nothing() {
    let temp_dir = create_test_project(vec![("src/main.rs", "fn main() {}\n")]);
    let (config, snapshot) = generate(&temp_dir, ".", "/").unwrap();

    let written = emitter::emit(&snapshot, &config.project_root).unwrap();
    assert!(written.is_empty());
}

#[test]
fn test_rerun_is_byte_identical() {
    let temp_dir = user_project();

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let (config, snapshot) = generate(&temp_dir, ".", "/api").unwrap();
        emitter::emit(&snapshot, &config.project_root).unwrap();
        outputs.push((
            fs::read(temp_dir.path().join("gp_bean_init.rs")).unwrap(),
            fs::read(temp_dir.path().join("gp_api.def")).unwrap(),
        ));
    }

    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn test_print_formats() {
    let temp_dir = user_project();
    let (_, snapshot) = generate(&temp_dir, ".", "/api").unwrap();

    let yaml = serialize_yaml(&snapshot).unwrap();
    assert!(yaml.contains("UserCtrl"));
    assert!(yaml.contains("/api/users/all"));

    let json = serialize_json(&snapshot).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["controllers"]["UserCtrl"]["api_cache"][0]["Method"], "GET");
}
