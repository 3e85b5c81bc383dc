//! gobridge_engine: projection orchestration.
//!
//! Runs the full pipeline over a loaded registry: ancestor resolution,
//! conflict flattening, member projection and declaration generation, one
//! class at a time and in parallel across classes. The registry is
//! read-only for the whole run and per-class results land in disjoint
//! output artifacts, so the parallel phase shares nothing mutable beyond
//! the append-only memoization caches.

use gobridge_ancestry::{AncestorResolver, Flattener};
use gobridge_core::ids::TypeId;
use gobridge_diagnostics::{FailureSet, ProjectionError};
use gobridge_gen::{GeneratedType, TypeGenerator};
use gobridge_model::TypeRegistry;
use rayon::prelude::*;

/// The outcome of projecting a whole registry.
///
/// A run with class-level failures still completes: `generated` holds
/// every class that projected cleanly (sorted by fully-qualified name for
/// reproducible output) and `failures` the precise list of who failed and
/// why. Fatal errors never reach this type; they fail the run itself.
#[derive(Debug)]
pub struct ProjectionOutput {
    pub generated: Vec<GeneratedType>,
    pub failures: FailureSet,
}

impl ProjectionOutput {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One projection run over one registry.
pub struct ProjectionRun<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> ProjectionRun<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Project every class and interface in the registry.
    ///
    /// Per-class errors are collected against the failing class and do not
    /// abort siblings; unresolved references and broken engine invariants
    /// abort the whole run. Failed classes emit nothing; no partial
    /// declarations ever leave the engine.
    pub fn project_all(&self) -> Result<ProjectionOutput, ProjectionError> {
        let resolver = AncestorResolver::new(self.registry);
        let flattener = Flattener::new(&resolver);
        let generator = TypeGenerator::new(self.registry, &resolver, &flattener);

        let ids: Vec<TypeId> = self.registry.ids().collect();
        let results: Vec<(TypeId, Result<GeneratedType, ProjectionError>)> = ids
            .into_par_iter()
            .map(|id| (id, generator.generate(id)))
            .collect();

        let mut generated = Vec::with_capacity(results.len());
        let mut failures = FailureSet::new();
        for (id, result) in results {
            match result {
                Ok(artifact) => generated.push(artifact),
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => {
                    let fqn = self.registry.text(self.registry.get(id).fqn);
                    failures.add(fqn, error);
                }
            }
        }

        // Rayon preserves input order, but sort anyway: output order is a
        // determinism contract, not an accident of scheduling.
        generated.sort_by(|a, b| a.fqn.cmp(&b.fqn));
        failures.sort();

        Ok(ProjectionOutput { generated, failures })
    }

    /// Project a single class, bypassing the parallel batch path.
    pub fn project_one(&self, id: TypeId) -> Result<GeneratedType, ProjectionError> {
        let resolver = AncestorResolver::new(self.registry);
        let flattener = Flattener::new(&resolver);
        TypeGenerator::new(self.registry, &resolver, &flattener).generate(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gobridge_model::{Method, Primitive, TypeNodeBuilder, TypeRef};

    #[test]
    fn test_empty_registry_projects_to_nothing() {
        let registry = TypeRegistry::new();
        let output = ProjectionRun::new(&registry).project_all().unwrap();
        assert!(output.generated.is_empty());
        assert!(output.is_clean());
    }

    #[test]
    fn test_output_sorted_by_fqn() {
        let mut registry = TypeRegistry::new();
        let interner = registry.interner().clone();
        registry.add(TypeNodeBuilder::class(&interner, "acme.Zebra", "acme").build());
        registry.add(TypeNodeBuilder::class(&interner, "acme.Aardvark", "acme").build());
        let output = ProjectionRun::new(&registry).project_all().unwrap();
        let fqns: Vec<&str> = output.generated.iter().map(|g| g.fqn.as_str()).collect();
        assert_eq!(fqns, vec!["acme.Aardvark", "acme.Zebra"]);
    }

    #[test]
    fn test_project_one_matches_batch_output() {
        let mut registry = TypeRegistry::new();
        let interner = registry.interner().clone();
        let id = registry.add(TypeNodeBuilder::class(&interner, "acme.Widget", "acme").build());
        let run = ProjectionRun::new(&registry);
        let single = run.project_one(id).unwrap();
        let batch = run.project_all().unwrap();
        assert_eq!(batch.generated, vec![single]);
    }

    #[test]
    fn test_unresolved_reference_fails_run() {
        let mut registry = TypeRegistry::new();
        let interner = registry.interner().clone();
        registry.add(TypeNodeBuilder::class(&interner, "acme.Fine", "acme").build());
        registry.add(
            TypeNodeBuilder::class(&interner, "acme.Broken", "acme")
                .base(&interner, "acme.Missing")
                .build(),
        );
        let err = ProjectionRun::new(&registry).project_all().unwrap_err();
        assert!(matches!(err, ProjectionError::UnresolvedReference { .. }));
    }

    #[test]
    fn test_unprojectable_class_does_not_poison_siblings() {
        let mut registry = TypeRegistry::new();
        let interner = registry.interner().clone();
        registry.add(
            TypeNodeBuilder::class(&interner, "acme.Bad", "acme")
                .method(Method {
                    name: interner.intern("hook"),
                    is_static: false,
                    parameters: vec![],
                    returns: Some(TypeRef::Callable),
                })
                .build(),
        );
        registry.add(
            TypeNodeBuilder::class(&interner, "acme.Good", "acme")
                .method(Method {
                    name: interner.intern("greet"),
                    is_static: false,
                    parameters: vec![],
                    returns: Some(TypeRef::Primitive(Primitive::String)),
                })
                .build(),
        );

        let output = ProjectionRun::new(&registry).project_all().unwrap();
        let fqns: Vec<&str> = output.generated.iter().map(|g| g.fqn.as_str()).collect();
        assert_eq!(fqns, vec!["acme.Good"]);
        assert_eq!(output.failures.len(), 1);
        assert_eq!(output.failures.failures()[0].fqn, "acme.Bad");
    }
}
