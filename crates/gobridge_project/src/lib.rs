//! gobridge_project: member and type-reference projection.
//!
//! Maps source-model members into target-language capability signatures.
//! Pure and total over resolvable references: every projectable type has
//! exactly one deterministic spelling, unresolvable names fail the run and
//! unprojectable value types fail the containing class.

use gobridge_core::ids::TypeId;
use gobridge_core::intern::Name;
use gobridge_diagnostics::ProjectionError;
use gobridge_model::{Method, Primitive, Property, TypeRef, TypeRegistry};

/// One projected parameter: target-language name and type spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedParameter {
    pub name: String,
    pub ty: String,
}

/// A method projected into a target capability signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedSignature {
    /// Exported target-language name (`greet` becomes `Greet`).
    pub go_name: String,
    /// The member identity the runtime bridge dispatches on.
    pub source_name: String,
    pub parameters: Vec<ProjectedParameter>,
    pub returns: Option<String>,
}

impl ProjectedSignature {
    /// The parameter list as it appears between parentheses.
    pub fn params_text(&self) -> String {
        self.parameters
            .iter()
            .map(|p| format!("{} {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A property projected into getter (and optionally setter) signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedProperty {
    /// Getter name; same as the exported property name.
    pub getter: String,
    /// Setter name, present iff the property is settable.
    pub setter: Option<String>,
    pub source_name: String,
    pub value_ty: String,
}

/// Projects members of one node. Carries the node's assembly so foreign
/// type references pick up a package qualifier.
pub struct MemberProjector<'a> {
    registry: &'a TypeRegistry,
    class_fqn: Name,
    assembly: Name,
}

impl<'a> MemberProjector<'a> {
    pub fn for_node(registry: &'a TypeRegistry, id: TypeId) -> Self {
        let node = registry.get(id);
        Self {
            registry,
            class_fqn: node.fqn,
            assembly: node.assembly,
        }
    }

    /// The deterministic target spelling of a type reference.
    pub fn type_spelling(&self, type_ref: &TypeRef) -> Result<String, ProjectionError> {
        match type_ref {
            TypeRef::Primitive(p) => Ok(primitive_spelling(*p).to_string()),
            TypeRef::Named(fqn) => self.named_spelling(*fqn),
            TypeRef::List(inner) => Ok(format!("[]{}", self.type_spelling(inner)?)),
            TypeRef::Map(inner) => Ok(format!("map[string]{}", self.type_spelling(inner)?)),
            TypeRef::Optional(inner) => self.optional_spelling(inner),
            TypeRef::Callable => Err(ProjectionError::UnprojectableType {
                type_name: "callable".to_string(),
                class: self.registry.text(self.class_fqn).to_string(),
            }),
        }
    }

    fn optional_spelling(&self, inner: &TypeRef) -> Result<String, ProjectionError> {
        let spelled = self.type_spelling(inner)?;
        match inner {
            // Scalars need a pointer to express absence; collections,
            // interfaces and the empty interface are already nilable.
            TypeRef::Primitive(Primitive::String)
            | TypeRef::Primitive(Primitive::Number)
            | TypeRef::Primitive(Primitive::Boolean) => Ok(format!("*{}", spelled)),
            _ => Ok(spelled),
        }
    }

    fn named_spelling(&self, fqn: Name) -> Result<String, ProjectionError> {
        let id = self.registry.resolve(fqn).ok_or_else(|| ProjectionError::UnresolvedReference {
            name: self.registry.text(fqn).to_string(),
            referenced_by: self.registry.text(self.class_fqn).to_string(),
        })?;
        Ok(self.capability_name(id))
    }

    /// The capability-interface spelling of a node, package-qualified when
    /// it lives in a foreign assembly.
    pub fn capability_name(&self, id: TypeId) -> String {
        let node = self.registry.get(id);
        let simple = go_export(simple_name(self.registry.text(node.fqn)));
        if node.assembly == self.assembly {
            simple
        } else {
            format!("{}.{}", package_alias(self.registry.text(node.assembly)), simple)
        }
    }

    /// The proxy-struct spelling of a node. Only meaningful for ancestors
    /// in the same assembly; foreign ancestors embed by capability
    /// interface instead.
    pub fn proxy_name(&self, id: TypeId) -> String {
        let node = self.registry.get(id);
        format!("proxy_{}", go_export(simple_name(self.registry.text(node.fqn))))
    }

    pub fn is_local(&self, id: TypeId) -> bool {
        self.registry.get(id).assembly == self.assembly
    }

    pub fn project_method(&self, method: &Method) -> Result<ProjectedSignature, ProjectionError> {
        let mut parameters = Vec::with_capacity(method.parameters.len());
        for p in &method.parameters {
            parameters.push(ProjectedParameter {
                name: self.registry.text(p.name).to_string(),
                ty: self.type_spelling(&p.type_ref)?,
            });
        }
        let returns = match &method.returns {
            Some(r) => Some(self.type_spelling(r)?),
            None => None,
        };
        let source_name = self.registry.text(method.name).to_string();
        Ok(ProjectedSignature {
            go_name: go_export(&source_name),
            source_name,
            parameters,
            returns,
        })
    }

    pub fn project_property(&self, property: &Property) -> Result<ProjectedProperty, ProjectionError> {
        let source_name = self.registry.text(property.name).to_string();
        let getter = go_export(&source_name);
        let setter = if property.immutable {
            None
        } else {
            Some(format!("Set{}", getter))
        };
        Ok(ProjectedProperty {
            getter,
            setter,
            source_name,
            value_ty: self.type_spelling(&property.value)?,
        })
    }

    /// Free-function name for a static member: scoped by the owning type,
    /// since the target's structural interfaces carry instance capabilities
    /// only.
    pub fn static_function_name(&self, owner: TypeId, member: Name) -> String {
        let owner_name = go_export(simple_name(self.registry.text(self.registry.get(owner).fqn)));
        format!("{}_{}", owner_name, go_export(self.registry.text(member)))
    }
}

fn primitive_spelling(p: Primitive) -> &'static str {
    match p {
        Primitive::String => "string",
        Primitive::Number => "float64",
        Primitive::Boolean => "bool",
        Primitive::Any | Primitive::Json => "interface{}",
    }
}

/// Last segment of a fully-qualified name.
pub fn simple_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}

/// Export a name into the target's public casing.
pub fn go_export(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Derive a target package alias from an assembly name: lowercase, with
/// everything the target cannot carry in an identifier stripped.
pub fn package_alias(assembly: &str) -> String {
    assembly
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}
