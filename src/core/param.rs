//! Parameter list model: type specifications and typed values.

use std::fmt;

/// Interpolation class of a primitive variable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Class {
    Constant,
    #[default]
    Uniform,
    Varying,
    Vertex,
    FaceVarying,
    FaceVertex,
}

impl Class {
    /// RIB keyword for this class.
    pub const fn as_str(self) -> &'static str {
        match self {
            Class::Constant => "constant",
            Class::Uniform => "uniform",
            Class::Varying => "varying",
            Class::Vertex => "vertex",
            Class::FaceVarying => "facevarying",
            Class::FaceVertex => "facevertex",
        }
    }

    /// Parse a RIB class keyword.
    pub fn parse(word: &str) -> Option<Self> {
        Some(match word {
            "constant" => Class::Constant,
            "uniform" => Class::Uniform,
            "varying" => Class::Varying,
            "vertex" => Class::Vertex,
            "facevarying" => Class::FaceVarying,
            "facevertex" => Class::FaceVertex,
            _ => return None,
        })
    }
}

/// Element type of a primitive variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Float,
    Integer,
    String,
    Point,
    Vector,
    Normal,
    HPoint,
    Color,
    Matrix,
}

impl Type {
    /// RIB keyword for this type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Type::Float => "float",
            Type::Integer => "integer",
            Type::String => "string",
            Type::Point => "point",
            Type::Vector => "vector",
            Type::Normal => "normal",
            Type::HPoint => "hpoint",
            Type::Color => "color",
            Type::Matrix => "matrix",
        }
    }

    /// Parse a RIB type keyword. `int` is accepted for `integer`.
    pub fn parse(word: &str) -> Option<Self> {
        Some(match word {
            "float" => Type::Float,
            "integer" | "int" => Type::Integer,
            "string" => Type::String,
            "point" => Type::Point,
            "vector" => Type::Vector,
            "normal" => Type::Normal,
            "hpoint" => Type::HPoint,
            "color" => Type::Color,
            "matrix" => Type::Matrix,
            _ => return None,
        })
    }

    /// Storage type used to carry values of this type.
    pub const fn storage(self) -> StorageType {
        match self {
            Type::Integer => StorageType::Integer,
            Type::String => StorageType::String,
            _ => StorageType::Float,
        }
    }
}

/// How parameter values are physically stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageType {
    Float,
    Integer,
    String,
}

/// Full type specification of a parameter: class, type and array size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeSpec {
    pub iclass: Class,
    pub ty: Type,
    pub array_size: u32,
}

impl TypeSpec {
    /// Create a type spec.
    pub const fn new(iclass: Class, ty: Type, array_size: u32) -> Self {
        Self { iclass, ty, array_size }
    }

    /// Uniform, non-array type spec.
    pub const fn uniform(ty: Type) -> Self {
        Self::new(Class::Uniform, ty, 1)
    }

    /// Storage type of values with this spec.
    pub const fn storage(&self) -> StorageType {
        self.ty.storage()
    }
}

/// Prints as `class type[n]`, omitting `[n]` for n == 1.
impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.iclass.as_str(), self.ty.as_str())?;
        if self.array_size != 1 {
            write!(f, "[{}]", self.array_size)?;
        }
        Ok(())
    }
}

/// Value payload of a parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Float(Vec<f32>),
    Integer(Vec<i32>),
    String(Vec<String>),
}

impl ParamValue {
    /// Storage type of the payload.
    pub const fn storage(&self) -> StorageType {
        match self {
            ParamValue::Float(_) => StorageType::Float,
            ParamValue::Integer(_) => StorageType::Integer,
            ParamValue::String(_) => StorageType::String,
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        match self {
            ParamValue::Float(v) => v.len(),
            ParamValue::Integer(v) => v.len(),
            ParamValue::String(v) => v.len(),
        }
    }

    /// True if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One entry of a request's trailing parameter list.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub spec: TypeSpec,
    pub name: String,
    pub value: ParamValue,
}

impl Param {
    /// Create a parameter. The payload storage must match its type.
    pub fn new(spec: TypeSpec, name: impl Into<String>, value: ParamValue) -> Self {
        debug_assert_eq!(spec.storage(), value.storage(), "parameter payload does not match its type");
        Self { spec, name: name.into(), value }
    }

    /// Uniform float parameter.
    pub fn float(name: impl Into<String>, values: impl Into<Vec<f32>>) -> Self {
        Self::new(TypeSpec::uniform(Type::Float), name, ParamValue::Float(values.into()))
    }

    /// Uniform integer parameter.
    pub fn integer(name: impl Into<String>, values: impl Into<Vec<i32>>) -> Self {
        Self::new(TypeSpec::uniform(Type::Integer), name, ParamValue::Integer(values.into()))
    }

    /// Uniform string parameter.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(TypeSpec::uniform(Type::String), name, ParamValue::String(vec![value.into()]))
    }

    /// Fully qualified token, e.g. `vertex point P`.
    pub fn qualified_name(&self) -> String {
        format!("{} {}", self.spec, self.name)
    }

    /// First string value, if this is a string parameter.
    pub fn first_string(&self) -> Option<&str> {
        match &self.value {
            ParamValue::String(v) => v.first().map(String::as_str),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        let p = Param::new(
            TypeSpec::new(Class::Vertex, Type::Point, 1),
            "P",
            ParamValue::Float(vec![0.0; 3]),
        );
        assert_eq!(p.qualified_name(), "vertex point P");

        let p = Param::new(
            TypeSpec::new(Class::Constant, Type::Float, 2),
            "range",
            ParamValue::Float(vec![0.0, 1.0]),
        );
        assert_eq!(p.qualified_name(), "constant float[2] range");
    }

    #[test]
    fn test_storage_types() {
        assert_eq!(Type::Color.storage(), StorageType::Float);
        assert_eq!(Type::Integer.storage(), StorageType::Integer);
        assert_eq!(Type::String.storage(), StorageType::String);
    }

    #[test]
    fn test_first_string() {
        let p = Param::string("archive", "/tmp/ribs");
        assert_eq!(p.first_string(), Some("/tmp/ribs"));
        assert_eq!(Param::float("Kd", [0.5]).first_string(), None);
    }
}
