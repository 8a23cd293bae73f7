//! End-to-end checks over a small class library.

use antipatterns::rules::{recommended_rules, strict_rules, ClassHierarchy, FinalSignature};
use antipatterns::{
    analyze_paths, analyze_paths_with, AnalysisResult, Analyzer, ClassDescriptor, ClassPath,
    Config, DescriptorSet, FindingKind, Priority, RunOptions, Traversal,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/library.json")
}

fn library() -> DescriptorSet {
    DescriptorSet::from_file(&fixture()).unwrap()
}

fn analyzer(traversal: Traversal) -> Analyzer {
    let mut builder = Analyzer::builder().traversal(traversal);
    for rule in recommended_rules() {
        builder = builder.rule_box(rule);
    }
    builder.build().unwrap()
}

fn run(traversal: Traversal) -> AnalysisResult {
    let set = library();
    let classpath = set.class_path(true);
    analyzer(traversal).analyze(&classpath, &set.classes)
}

fn render(result: &AnalysisResult) -> String {
    result
        .findings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn library_findings() {
    let result = run(Traversal::Direct);
    assert!(result.failures.is_empty());
    assert_eq!(result.classes_checked, 6);
    insta::assert_snapshot!(render(&result), @r"
    com.example.B: high [ExtendsConcreteType] com.example.B extends concrete type com.example.C
    com.example.F: low [FinalType] com.example.F is declared final
    com.example.Api: normal [FinalTypeReturn] g() returns final type com.example.FinalResult
    com.example.Api: normal [FinalTypeParam] h(com.example.FinalParam) takes final type com.example.FinalParam as parameter 0
    com.example.Sealed: low [FinalType] com.example.Sealed is declared final
    com.example.Sealed: normal [FinalTypeConstructor] final class com.example.Sealed exposes constructor <init>()
    ");
}

#[test]
fn extending_root_or_designed_base_is_clean() {
    let result = run(Traversal::Direct);
    for clean in ["com.example.A", "com.example.D", "com.example.Api$1"] {
        assert!(
            result.findings.iter().all(|f| f.subject_class != clean),
            "{clean} should have no findings"
        );
    }
}

#[test]
fn signature_findings_carry_method_and_type() {
    let result = run(Traversal::Direct);

    let ret = result.by_kind(FindingKind::FinalTypeReturn);
    assert_eq!(ret.len(), 1);
    assert_eq!(ret[0].subject_class, "com.example.Api");
    assert_eq!(ret[0].related_method.as_ref().unwrap().name, "g");
    assert_eq!(ret[0].related_type.as_deref(), Some("com.example.FinalResult"));

    let param = result.by_kind(FindingKind::FinalTypeParam);
    assert_eq!(param.len(), 1);
    assert_eq!(param[0].related_method.as_ref().unwrap().name, "h");
    assert_eq!(param[0].related_parameter_index, Some(0));
    assert_eq!(param[0].related_type.as_deref(), Some("com.example.FinalParam"));
}

#[test]
fn preorder_reports_the_same_findings() {
    let direct = run(Traversal::Direct);
    let preorder = run(Traversal::Preorder);
    assert_eq!(direct.findings, preorder.findings);
    assert_eq!(preorder.classes_checked, direct.classes_checked);
}

#[test]
fn preorder_leaves_classpath_ancestors_alone() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/library_chain.json");
    let set = DescriptorSet::from_file(&path).unwrap();
    let classpath = set.class_path(true);

    let direct = analyzer(Traversal::Direct).analyze(&classpath, &set.classes);
    let preorder = analyzer(Traversal::Preorder).analyze(&classpath, &set.classes);

    assert_eq!(preorder.findings, direct.findings);
    assert_eq!(preorder.classes_checked, 1);
    insta::assert_snapshot!(render(&preorder), @"com.example.User: high [ExtendsConcreteType] com.example.User extends concrete type lib.LinkedMap");
}

#[test]
fn repeated_presentation_reports_once() {
    let set = library();
    let classpath = set.class_path(true);
    let analyzer = analyzer(Traversal::Direct);

    let twice = set.classes.iter().chain(set.classes.iter());
    let result = analyzer.analyze(&classpath, twice);
    assert_eq!(result.findings.len(), 6);
}

#[test]
fn independent_runs_agree() {
    let set = library();
    let classpath = set.class_path(true);
    let analyzer = analyzer(Traversal::Preorder);

    let first = analyzer.analyze(&classpath, &set.classes);
    let second = analyzer.analyze(&classpath, &set.classes);
    assert_eq!(first.findings, second.findings);
    assert_eq!(first.classes_checked, second.classes_checked);
}

#[test]
fn cyclic_chain_completes_without_findings() {
    let x = ClassDescriptor::new("com.example.X").extends("com.example.Y");
    let y = ClassDescriptor::new("com.example.Y").extends("com.example.X");
    let classpath = ClassPath::with_platform_types()
        .with(x.clone())
        .with(y.clone());

    for traversal in [Traversal::Direct, Traversal::Preorder] {
        let result = analyzer(traversal).analyze(&classpath, [&x, &y]);
        assert!(result.findings.is_empty());
        assert!(result.failures.is_empty());
    }
}

#[test]
fn missing_classpath_degrades_to_silence() {
    let set = library();
    let bare = DescriptorSet {
        classes: set.classes.clone(),
        classpath: Vec::new(),
    };
    let classpath = bare.class_path(false);
    let result = analyzer(Traversal::Direct).analyze(&classpath, &bare.classes);

    // Only findings that need no resolution remain.
    let kinds: Vec<FindingKind> = result.findings.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FindingKind::FinalType,
            FindingKind::FinalType,
            FindingKind::FinalTypeConstructor,
        ]
    );
}

#[test]
fn strict_exemptions_report_throwable_subclass() {
    let failure =
        ClassDescriptor::new("com.example.Failure").extends("java.lang.RuntimeException");
    let classpath = ClassPath::with_platform_types().with(failure.clone());

    let lenient = Analyzer::builder()
        .rule(ClassHierarchy::new())
        .build()
        .unwrap()
        .analyze(&classpath, [&failure]);
    assert!(lenient.findings.is_empty());

    let mut builder = Analyzer::builder();
    for rule in strict_rules() {
        builder = builder.rule_box(rule);
    }
    let strict = builder.build().unwrap().analyze(&classpath, [&failure]);
    assert_eq!(strict.findings.len(), 1);
    assert_eq!(
        strict.findings[0].related_class.as_deref(),
        Some("java.lang.RuntimeException")
    );
}

#[test]
fn analyze_paths_applies_config() {
    let tmp = TempDir::new().unwrap();
    fs::copy(fixture(), tmp.path().join("library.json")).unwrap();

    let config = Config::parse(
        r#"
suppress = ["FinalType"]

[rules.final-signature]
priority = "high"
check_constructors = false
"#,
    )
    .unwrap();

    let result = analyze_paths(&[tmp.path()], config).unwrap();
    let kinds: Vec<FindingKind> = result.findings.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FindingKind::ExtendsConcreteType,
            FindingKind::FinalTypeReturn,
            FindingKind::FinalTypeParam,
        ]
    );
    assert!(result.findings.iter().all(|f| f.priority == Priority::High));
}

#[test]
fn run_options_override_config() {
    let tmp = TempDir::new().unwrap();
    fs::copy(fixture(), tmp.path().join("library.json")).unwrap();
    let config = Config::parse(r#"preset = "minimal""#).unwrap();

    let signature_only = RunOptions {
        rules: Some(vec!["AP002".to_string()]),
        traversal: Some(Traversal::Preorder),
        ..RunOptions::default()
    };
    let result = analyze_paths_with(&[tmp.path()], config.clone(), &signature_only).unwrap();
    let kinds: Vec<FindingKind> = result.findings.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FindingKind::FinalTypeReturn,
            FindingKind::FinalTypeParam,
            FindingKind::FinalTypeConstructor,
        ]
    );

    // Without the platform types no superclass chain reaches the root.
    let bare = RunOptions {
        skip_platform_types: true,
        ..RunOptions::default()
    };
    let result = analyze_paths_with(&[tmp.path()], config, &bare).unwrap();
    let kinds: Vec<FindingKind> = result.findings.iter().map(|f| f.kind).collect();
    assert_eq!(kinds, vec![FindingKind::FinalType, FindingKind::FinalType]);
}

#[test]
fn analyze_paths_reports_bad_descriptor() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.json"), "{ not json").unwrap();
    assert!(analyze_paths(&[tmp.path()], Config::default()).is_err());
}

#[test]
fn single_rule_analyzer() {
    let set = library();
    let classpath = set.class_path(true);
    let result = Analyzer::builder()
        .rule(FinalSignature::new().check_constructors(false))
        .build()
        .unwrap()
        .analyze(&classpath, &set.classes);
    assert_eq!(result.findings.len(), 2);
}
