//! Type references and member declarations.

use gobridge_core::intern::Name;

/// Primitive value kinds the source model can reference.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    /// Dynamically-typed value; projects to the target's empty interface.
    Any,
    /// Structured JSON blob; also projects to the empty interface.
    Json,
}

/// A reference to a type, as it appears in a member signature.
///
/// Named references carry the referee's fully-qualified name; they are
/// resolved through the registry on demand, never as back-pointers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(Primitive),
    /// Reference to another class or interface by fully-qualified name.
    Named(Name),
    List(Box<TypeRef>),
    Map(Box<TypeRef>),
    Optional(Box<TypeRef>),
    /// A function-valued type. The target language has no spelling for
    /// these; projecting one fails the containing class.
    Callable,
}

impl TypeRef {
    pub fn list(elem: TypeRef) -> Self {
        TypeRef::List(Box::new(elem))
    }

    pub fn map(elem: TypeRef) -> Self {
        TypeRef::Map(Box::new(elem))
    }

    pub fn optional(inner: TypeRef) -> Self {
        TypeRef::Optional(Box::new(inner))
    }

    /// All named references mentioned anywhere inside this reference.
    pub fn named_refs(&self, out: &mut Vec<Name>) {
        match self {
            TypeRef::Named(name) => out.push(*name),
            TypeRef::List(inner) | TypeRef::Map(inner) | TypeRef::Optional(inner) => {
                inner.named_refs(out)
            }
            TypeRef::Primitive(_) | TypeRef::Callable => {}
        }
    }
}

/// One method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: Name,
    pub type_ref: TypeRef,
}

/// A method declaration as it appears on its defining node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: Name,
    pub is_static: bool,
    pub parameters: Vec<Parameter>,
    /// `None` means the method returns nothing.
    pub returns: Option<TypeRef>,
}

impl Method {
    /// Structural identity of this method: two ancestors contributing a
    /// member with equal signatures contribute the *same* logical member.
    pub fn signature(&self) -> Signature {
        Signature {
            name: self.name,
            parameters: self.parameters.iter().map(|p| p.type_ref.clone()).collect(),
            returns: self.returns.clone(),
        }
    }
}

/// A property declaration as it appears on its defining node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: Name,
    pub is_static: bool,
    pub value: TypeRef,
    /// Read-only properties project a getter but no setter.
    pub immutable: bool,
}

impl Property {
    /// Structural identity, comparable against method signatures: a
    /// property is its getter shape (no parameters, returns the value).
    pub fn signature(&self) -> Signature {
        Signature {
            name: self.name,
            parameters: Vec::new(),
            returns: Some(self.value.clone()),
        }
    }
}

/// A constructor declaration. At most one per class in the source model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub parameters: Vec<Parameter>,
}

/// Structural member identity: name plus parameter and return types.
///
/// Used to deduplicate members that arrive through more than one ancestor
/// path (diamond-shaped interface inheritance) and to detect conflicting
/// same-name members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub name: Name,
    pub parameters: Vec<TypeRef>,
    pub returns: Option<TypeRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use gobridge_core::intern::Interner;

    #[test]
    fn test_signature_identity_across_paths() {
        let interner = Interner::new();
        let greet = interner.intern("greet");
        let a = Method {
            name: greet,
            is_static: false,
            parameters: vec![],
            returns: Some(TypeRef::Primitive(Primitive::String)),
        };
        let b = a.clone();
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn test_signature_distinguishes_parameter_types() {
        let interner = Interner::new();
        let name = interner.intern("resize");
        let p = interner.intern("value");
        let m = |t: TypeRef| Method {
            name,
            is_static: false,
            parameters: vec![Parameter { name: p, type_ref: t }],
            returns: None,
        };
        let by_number = m(TypeRef::Primitive(Primitive::Number));
        let by_string = m(TypeRef::Primitive(Primitive::String));
        assert_ne!(by_number.signature(), by_string.signature());
    }

    #[test]
    fn test_named_refs_walks_nested() {
        let interner = Interner::new();
        let widget = interner.intern("acme.Widget");
        let t = TypeRef::optional(TypeRef::list(TypeRef::Named(widget)));
        let mut out = Vec::new();
        t.named_refs(&mut out);
        assert_eq!(out, vec![widget]);
    }
}
