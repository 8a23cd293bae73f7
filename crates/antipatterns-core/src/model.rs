//! Structural description of compiled types.
//!
//! These types are what a class-file reader produces and what the rules
//! consume. They carry declared structure only: modifiers, names and
//! signatures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reserved method name used for constructors.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Reserved method name used for static initializers.
pub const STATIC_INITIALIZER_NAME: &str = "<clinit>";

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// Visible everywhere.
    Public,
    /// Visible to subclasses and the declaring package.
    Protected,
    /// Visible to the declaring package only.
    #[default]
    PackagePrivate,
    /// Visible to the declaring class only.
    Private,
}

impl Visibility {
    /// Returns true for members that are part of the extensible contract
    /// (`public` or `protected`).
    #[must_use]
    pub fn is_exposed(self) -> bool {
        matches!(self, Self::Public | Self::Protected)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Protected => write!(f, "protected"),
            Self::PackagePrivate => write!(f, "package-private"),
            Self::Private => write!(f, "private"),
        }
    }
}

/// Error parsing a [`TypeRef`] from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeRefError {
    /// The type string was empty.
    #[error("empty type reference")]
    Empty,

    /// The type string is not a valid type name.
    #[error("invalid type reference `{0}`")]
    Invalid(String),
}

/// A reference to a type in a method signature.
///
/// Written in source notation: `void`, `int`, `com.example.Foo`,
/// `com.example.Foo[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// No value (`void`).
    Void,
    /// A primitive such as `int`.
    Primitive(String),
    /// A named class or interface.
    Object(String),
    /// An array of the element type.
    Array(Box<TypeRef>),
}

impl TypeRef {
    /// Creates a reference to a named class or interface.
    #[must_use]
    pub fn object(name: impl Into<String>) -> Self {
        Self::Object(name.into())
    }

    /// Returns the class name if this is a named class/interface reference.
    ///
    /// Arrays return `None`; only direct references take part in finality
    /// checks.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Object(name) => Some(name),
            _ => None,
        }
    }
}

impl FromStr for TypeRef {
    type Err = TypeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TypeRefError::Empty);
        }

        if let Some(element) = s.strip_suffix("[]") {
            let element: TypeRef = element.parse().map_err(|e| match e {
                TypeRefError::Empty => TypeRefError::Invalid(s.to_string()),
                other => other,
            })?;
            if element == Self::Void {
                return Err(TypeRefError::Invalid(s.to_string()));
            }
            return Ok(Self::Array(Box::new(element)));
        }

        if s == "void" {
            return Ok(Self::Void);
        }
        if PRIMITIVES.contains(&s) {
            return Ok(Self::Primitive(s.to_string()));
        }

        let valid = s.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        });
        if !valid {
            return Err(TypeRefError::Invalid(s.to_string()));
        }

        Ok(Self::Object(s.to_string()))
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Primitive(name) | Self::Object(name) => write!(f, "{name}"),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

fn void() -> TypeRef {
    TypeRef::Void
}

/// A declared method or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name; constructors use [`CONSTRUCTOR_NAME`].
    pub name: String,
    /// Declared visibility.
    #[serde(default)]
    pub visibility: Visibility,
    /// Declared return type.
    #[serde(default = "void")]
    pub return_type: TypeRef,
    /// Declared parameter types, in order.
    #[serde(default)]
    pub parameter_types: Vec<TypeRef>,
}

impl MethodDescriptor {
    /// Creates a method returning `void` with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            visibility,
            return_type: TypeRef::Void,
            parameter_types: Vec::new(),
        }
    }

    /// Creates a constructor with no parameters.
    #[must_use]
    pub fn constructor(visibility: Visibility) -> Self {
        Self::new(CONSTRUCTOR_NAME, visibility)
    }

    /// Sets the return type.
    #[must_use]
    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.return_type = ty;
        self
    }

    /// Appends a parameter type.
    #[must_use]
    pub fn param(mut self, ty: TypeRef) -> Self {
        self.parameter_types.push(ty);
        self
    }

    /// Returns true if this is a constructor.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    /// Renders `name(T1,T2)` for diagnostics.
    #[must_use]
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameter_types
            .iter()
            .map(ToString::to_string)
            .collect();
        format!("{}({})", self.name, params.join(","))
    }
}

/// One compiled type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Fully-qualified name, e.g. `com.example.Widget`.
    pub name: String,
    /// Superclass name; absent only for the universal root type.
    #[serde(default, rename = "superclass")]
    pub superclass_name: Option<String>,
    /// Declared `abstract`.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Declared `final`.
    #[serde(default, rename = "final")]
    pub is_final: bool,
    /// An enum type.
    #[serde(default, rename = "enum")]
    pub is_enum: bool,
    /// An interface type.
    #[serde(default, rename = "interface")]
    pub is_interface: bool,
    /// Compiler generated.
    #[serde(default, rename = "synthetic")]
    pub is_synthetic: bool,
    /// Declared methods and constructors, in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
    /// Creates a concrete class with no superclass and no members.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass_name: None,
            is_abstract: false,
            is_final: false,
            is_enum: false,
            is_interface: false,
            is_synthetic: false,
            methods: Vec::new(),
        }
    }

    /// Sets the superclass.
    #[must_use]
    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass_name = Some(superclass.into());
        self
    }

    /// Marks the class abstract.
    #[must_use]
    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Marks the class final.
    #[must_use]
    pub fn final_(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Marks the class as an enum.
    #[must_use]
    pub fn enum_(mut self) -> Self {
        self.is_enum = true;
        self
    }

    /// Marks the class as an interface.
    #[must_use]
    pub fn interface(mut self) -> Self {
        self.is_interface = true;
        self
    }

    /// Marks the class as compiler generated.
    #[must_use]
    pub fn synthetic(mut self) -> Self {
        self.is_synthetic = true;
        self
    }

    /// Appends a method.
    #[must_use]
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Iterates over declared constructors.
    pub fn constructors(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.iter().filter(|m| m.is_constructor())
    }
}
