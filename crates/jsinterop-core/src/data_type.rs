//! Declared types of parameters, returns and fields.
//!
//! [`DataType`] is the erased view of a Java type as the front end resolved
//! it. Two parameter lists are overload-equivalent exactly when their
//! `DataType`s are equal, so equality here is identity, not assignability.

use crate::TypeId;

/// Java primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    /// The keyword spelling (`int`).
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// The simple name of the wrapper class (`Integer`).
    pub const fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Char => "Character",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Int => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }

    /// 64-bit integers have no lossless JavaScript representation.
    #[inline]
    pub const fn is_long(self) -> bool {
        matches!(self, PrimitiveKind::Long)
    }
}

/// A resolved, erased Java type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    /// `void`, only meaningful as a return type.
    #[default]
    Void,
    /// A primitive such as `int`.
    Primitive(PrimitiveKind),
    /// A primitive wrapper such as `Integer`.
    Boxed(PrimitiveKind),
    /// `java.lang.String`.
    String,
    /// `java.lang.Object`.
    Object,
    /// A type declared in the checked program.
    Declared(TypeId),
    /// A library type outside the checked program, by simple name.
    External(String),
    /// An array; `element` is never itself an array.
    Array { element: Box<DataType>, dims: u32 },
}

impl DataType {
    /// `int`
    pub const INT: DataType = DataType::Primitive(PrimitiveKind::Int);
    /// `boolean`
    pub const BOOLEAN: DataType = DataType::Primitive(PrimitiveKind::Boolean);
    /// `long`
    pub const LONG: DataType = DataType::Primitive(PrimitiveKind::Long);

    /// Build an array type, flattening nested arrays into one dimension count.
    pub fn array_of(element: DataType, dims: u32) -> DataType {
        match element {
            DataType::Array {
                element,
                dims: inner,
            } => DataType::Array {
                element,
                dims: inner + dims,
            },
            element => DataType::Array {
                element: Box::new(element),
                dims,
            },
        }
    }

    /// Reference to a library type by simple name.
    pub fn external(name: impl Into<String>) -> DataType {
        DataType::External(name.into())
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, DataType::Void)
    }

    /// Primitive `boolean` only; the wrapper does not qualify as an `is` getter return.
    #[inline]
    pub fn is_primitive_boolean(&self) -> bool {
        matches!(self, DataType::Primitive(PrimitiveKind::Boolean))
    }

    /// The declared type this refers to, looking through arrays.
    pub fn declared_type(&self) -> Option<TypeId> {
        match self {
            DataType::Declared(id) => Some(*id),
            DataType::Array { element, .. } => element.declared_type(),
            _ => None,
        }
    }

    /// Render the type, resolving declared types through `resolve`.
    pub fn render(&self, resolve: &dyn Fn(TypeId) -> String) -> String {
        match self {
            DataType::Void => "void".to_string(),
            DataType::Primitive(kind) => kind.name().to_string(),
            DataType::Boxed(kind) => kind.boxed_name().to_string(),
            DataType::String => "String".to_string(),
            DataType::Object => "Object".to_string(),
            DataType::Declared(id) => resolve(*id),
            DataType::External(name) => name.clone(),
            DataType::Array { element, dims } => {
                let mut rendered = element.render(resolve);
                for _ in 0..*dims {
                    rendered.push_str("[]");
                }
                rendered
            }
        }
    }
}
