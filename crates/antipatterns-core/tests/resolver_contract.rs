//! Runs driven through custom resolvers.

use antipatterns_core::{
    ancestors, is_subtype, Analyzer, ClassContext, ClassDescriptor, ClassPath, ClassResolver,
    Finding, FindingKind, Priority, ResolutionError, Rule, RuleError, MAX_HIERARCHY_DEPTH,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts lookups against an inner class path.
struct CountingResolver {
    inner: ClassPath,
    lookups: AtomicUsize,
}

impl CountingResolver {
    fn new(inner: ClassPath) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }
}

impl ClassResolver for CountingResolver {
    fn resolve(&self, name: &str) -> Result<Arc<ClassDescriptor>, ResolutionError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.inner.resolve(name)
    }
}

/// Reports final classes whose superclass resolves.
struct FinalWithKnownParent;

impl Rule for FinalWithKnownParent {
    fn name(&self) -> &'static str {
        "final-with-known-parent"
    }

    fn code(&self) -> &'static str {
        "T001"
    }

    fn check(
        &self,
        ctx: &mut ClassContext<'_>,
        class: &ClassDescriptor,
    ) -> Result<Vec<Finding>, RuleError> {
        if !class.is_final || !ctx.try_visit(&class.name) {
            return Ok(Vec::new());
        }
        let Some(parent) = class.superclass_name.as_deref() else {
            return Ok(Vec::new());
        };
        if ctx.resolver.resolve(parent).is_err() {
            return Ok(Vec::new());
        }
        let finding = Finding::builder(FindingKind::FinalType, &class.name)
            .rule(self.name())
            .priority(Priority::Low)
            .build()?;
        Ok(vec![finding])
    }
}

fn classes() -> Vec<ClassDescriptor> {
    (0..20)
        .map(|i| {
            let class = ClassDescriptor::new(format!("com.example.C{i}"));
            let class = if i % 2 == 0 {
                class.extends("java.lang.Object")
            } else {
                class.extends("com.example.Missing")
            };
            if i % 3 == 0 {
                class.final_()
            } else {
                class
            }
        })
        .collect()
}

#[test]
fn independent_workers_share_one_resolver() {
    let classes = classes();
    let mut cp = ClassPath::with_platform_types();
    cp.extend(classes.iter().cloned());
    let resolver = CountingResolver::new(cp);
    let analyzer = Analyzer::builder()
        .rule(FinalWithKnownParent)
        .build()
        .unwrap();

    let results: Vec<_> = std::thread::scope(|s| {
        let workers: Vec<_> = (0..4)
            .map(|_| s.spawn(|| analyzer.analyze(&resolver, &classes)))
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    // C0, C6, C12, C18 are final with a resolvable parent.
    for result in &results {
        assert_eq!(result.findings.len(), 4);
        assert_eq!(result.findings, results[0].findings);
    }
    assert!(resolver.lookups.load(Ordering::Relaxed) > 0);
}

#[test]
fn resolution_is_deterministic() {
    let cp = ClassPath::with_platform_types();
    let first = cp.resolve("java.lang.String").unwrap();
    let second = cp.resolve("java.lang.String").unwrap();
    assert_eq!(first, second);
    assert!(matches!(
        cp.resolve("com.example.Absent"),
        Err(ResolutionError::NotFound { .. })
    ));
}

#[test]
fn overly_deep_chain_is_malformed() {
    let depth = MAX_HIERARCHY_DEPTH + 5;
    let mut cp = ClassPath::with_platform_types();
    cp.insert(ClassDescriptor::new("com.example.L0").extends("java.lang.Object"));
    for i in 1..=depth {
        cp.insert(
            ClassDescriptor::new(format!("com.example.L{i}"))
                .extends(format!("com.example.L{}", i - 1)),
        );
    }

    let leaf = format!("com.example.L{depth}");
    assert!(matches!(
        ancestors(&cp, &leaf),
        Err(ResolutionError::Malformed { .. })
    ));
    assert!(is_subtype(&cp, &leaf, "java.lang.Throwable").is_err());

    let shallow = format!("com.example.L{}", MAX_HIERARCHY_DEPTH - 10);
    assert_eq!(ancestors(&cp, &shallow).unwrap().len(), MAX_HIERARCHY_DEPTH - 9);
}
