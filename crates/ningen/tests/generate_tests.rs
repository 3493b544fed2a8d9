//! End-to-end generation against a real directory.

use std::fs;

use ningen::{
    DomainError, GlobRequest, Ningen, NingenError, PoolRef, RuleSpec, SETTINGS_FILE, Settings,
    TargetSpec,
};
use tempfile::TempDir;

#[test]
fn writes_nested_build_to_disk() {
    let dir = TempDir::new().unwrap();
    let mut n = Ningen::from_settings(dir.path(), Settings::default());

    let append = {
        let mut tools = n.package("tools");
        let binary = tools.file("append.sh");
        tools
            .rule(
                RuleSpec::new("append", "$binary $in $out")
                    .binary(binary)
                    .description("Appending text"),
            )
            .unwrap()
    };
    {
        let mut sub = n.package("subdir");
        let foo = sub.file("foo.txt");
        let out = foo.replace_extension(".out").unwrap();
        sub.build(TargetSpec::new(&append).inputs([foo]).outputs([out]))
            .unwrap();
    }

    let path = n.generate(&n.options()).unwrap();
    assert_eq!(path, dir.path().join("build.ninja"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "rule append\n  command = ./tools/append.sh $in $out\n  description = Appending text\n\n\
         rule ningen\n  command = ./BUILD\n  description = Regenerating Ninja file\n  generator = 1\n\n\
         build subdir/foo.out: append subdir/foo.txt | tools/append.sh\n\n\
         build build.ninja: ningen BUILD | BUILD\n\n"
    );
}

#[test]
fn creates_output_directory() {
    let dir = TempDir::new().unwrap();
    let settings = Settings {
        output: "out/gen/build.ninja".into(),
        ..Settings::default()
    };
    let n = Ningen::from_settings(dir.path(), settings);

    let path = n.generate(&n.options()).unwrap();
    assert_eq!(path, dir.path().join("out/gen/build.ninja"));
    let text = fs::read_to_string(path).unwrap();
    assert!(text.contains("build out/gen/build.ninja: ningen BUILD | BUILD\n"));
}

#[test]
fn failed_generation_leaves_manifest_untouched() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("build.ninja");
    fs::write(&manifest, "previous\n").unwrap();

    let mut n = Ningen::from_settings(dir.path(), Settings::default());
    let tool = n.file("tool.sh");
    n.rule(RuleSpec::new("run", "sh -c true").binary(tool))
        .unwrap();

    let err = n.generate(&n.options()).unwrap_err();
    assert!(matches!(
        err,
        NingenError::Domain(DomainError::UnusedBinary { .. })
    ));
    assert_eq!(
        err.to_string(),
        "binary property defined in rule run but not referenced in command: sh -c true"
    );
    assert_eq!(fs::read_to_string(&manifest).unwrap(), "previous\n");
}

#[test]
fn regenerates_when_build_description_changes() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src/nested")).unwrap();
    for name in ["src/b.rs", "src/a.rs", "src/nested/c.rs", "src/notes.md"] {
        fs::write(dir.path().join(name), "").unwrap();
    }

    let n = Ningen::from_settings(dir.path(), Settings::default());
    let inputs = n
        .glob(&GlobRequest::new(["src/**/*.rs"]).exclude(["src/b.rs"]))
        .unwrap();
    assert_eq!(inputs, vec![n.file("src/a.rs"), n.file("src/nested/c.rs")]);

    let text = n.generate_to_string(&n.options().inputs(inputs)).unwrap();
    assert!(text.contains("build build.ninja: ningen src/a.rs src/nested/c.rs | BUILD\n"));
}

#[test]
fn settings_file_is_honoured() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(SETTINGS_FILE),
        "script = \"build.rs\"\nenable_generator_rule = true\n",
    )
    .unwrap();

    let mut n = Ningen::new(dir.path()).unwrap();
    let console = n
        .rule(RuleSpec::new("test", "cargo test").pool(PoolRef::Console))
        .unwrap();
    let stamp = n.file("test.stamp");
    let script = n.file("build.rs");
    n.build(TargetSpec::new(&console).inputs([script]).outputs([stamp]))
        .unwrap();

    let text = n.generate_to_string(&n.options()).unwrap();
    assert!(text.contains("rule test\n  command = cargo test\n  pool = console\n\n"));
    assert!(text.contains("rule ningen\n  command = ./build.rs\n"));
}

#[test]
fn package_globs_sibling_directory() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("common")).unwrap();
    fs::create_dir_all(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("common/a.h"), "").unwrap();

    let mut n = Ningen::from_settings(dir.path(), Settings::default());
    let sub = n.package("sub");

    let headers = sub.glob(&GlobRequest::new(["../common/*.h"])).unwrap();
    assert_eq!(headers, vec![sub.file("../common/a.h")]);

    let absolute = format!("{}/common/*.h", dir.path().display());
    assert_eq!(sub.glob(&GlobRequest::new([absolute])).unwrap(), headers);
}
