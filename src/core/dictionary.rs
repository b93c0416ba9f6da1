//! Declaration dictionary: tracks the types of declared parameter tokens.
//!
//! Parameter names may be qualified inline (`"uniform float[2] range"`) or
//! bare (`"range"`), in which case their type must come from an earlier
//! `Declare` or from the standard predeclared set.

use std::collections::HashMap;

use super::param::{Class, Type, TypeSpec};
use crate::util::{Error, Result};

/// Tokens every RIB consumer knows without a `Declare`.
const STANDARD_DECLARATIONS: &[(&str, Class, Type, u32)] = &[
    ("P", Class::Vertex, Type::Point, 1),
    ("Pz", Class::Vertex, Type::Float, 1),
    ("Pw", Class::Vertex, Type::HPoint, 1),
    ("N", Class::Varying, Type::Normal, 1),
    ("Np", Class::Uniform, Type::Normal, 1),
    ("Cs", Class::Varying, Type::Color, 1),
    ("Os", Class::Varying, Type::Color, 1),
    ("s", Class::Varying, Type::Float, 1),
    ("t", Class::Varying, Type::Float, 1),
    ("st", Class::Varying, Type::Float, 2),
    ("width", Class::Varying, Type::Float, 1),
    ("constantwidth", Class::Constant, Type::Float, 1),
    ("Ka", Class::Uniform, Type::Float, 1),
    ("Kd", Class::Uniform, Type::Float, 1),
    ("Ks", Class::Uniform, Type::Float, 1),
    ("Kr", Class::Uniform, Type::Float, 1),
    ("roughness", Class::Uniform, Type::Float, 1),
    ("specularcolor", Class::Uniform, Type::Color, 1),
    ("texturename", Class::Uniform, Type::String, 1),
    ("intensity", Class::Uniform, Type::Float, 1),
    ("lightcolor", Class::Uniform, Type::Color, 1),
    ("from", Class::Uniform, Type::Point, 1),
    ("to", Class::Uniform, Type::Point, 1),
    ("coneangle", Class::Uniform, Type::Float, 1),
    ("conedeltaangle", Class::Uniform, Type::Float, 1),
    ("beamdistribution", Class::Uniform, Type::Float, 1),
    ("fov", Class::Uniform, Type::Float, 1),
    ("name", Class::Uniform, Type::String, 1),
    ("archive", Class::Uniform, Type::String, 1),
    ("shader", Class::Uniform, Type::String, 1),
    ("texture", Class::Uniform, Type::String, 1),
    ("display", Class::Uniform, Type::String, 1),
    ("procedural", Class::Uniform, Type::String, 1),
    ("resource", Class::Uniform, Type::String, 1),
];

/// Parse a type specification such as `vertex point` or `float[3]`.
///
/// The class defaults to `uniform` when omitted.
pub fn parse_type_spec(decl: &str) -> Option<TypeSpec> {
    let mut words = decl.split_whitespace().peekable();
    let iclass = match words.peek().and_then(|w| Class::parse(w)) {
        Some(c) => {
            words.next();
            c
        }
        None => Class::Uniform,
    };
    let rest: String = words.collect();
    if rest.is_empty() {
        return None;
    }
    let (ty_word, array_size) = match rest.split_once('[') {
        Some((ty, tail)) => {
            let n = tail.strip_suffix(']')?.trim().parse::<u32>().ok()?;
            (ty, n)
        }
        None => (rest.as_str(), 1),
    };
    let ty = Type::parse(ty_word)?;
    Some(TypeSpec::new(iclass, ty, array_size))
}

/// Split an inline declaration `"<type spec> <name>"` into its parts.
///
/// Returns `None` for a bare name or an unparseable type spec.
pub fn parse_inline_declaration(token: &str) -> Option<(TypeSpec, &str)> {
    let token = token.trim();
    let split = token.rfind(char::is_whitespace)?;
    let (decl, name) = token.split_at(split);
    let spec = parse_type_spec(decl)?;
    Some((spec, name.trim_start()))
}

/// Dictionary of declared tokens.
#[derive(Clone, Debug)]
pub struct TokenDictionary {
    entries: HashMap<String, TypeSpec>,
}

impl Default for TokenDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenDictionary {
    /// Create a dictionary holding the standard declarations.
    pub fn new() -> Self {
        let entries = STANDARD_DECLARATIONS
            .iter()
            .map(|&(name, iclass, ty, n)| (name.to_string(), TypeSpec::new(iclass, ty, n)))
            .collect();
        Self { entries }
    }

    /// Record `name` with the type given by `declaration`.
    pub fn declare(&mut self, name: &str, declaration: &str) -> Result<TypeSpec> {
        let spec = parse_type_spec(declaration)
            .ok_or_else(|| Error::BadDeclaration(format!("\"{declaration}\" for \"{name}\"")))?;
        self.entries.insert(name.to_string(), spec);
        Ok(spec)
    }

    /// Type of a previously declared token.
    pub fn lookup(&self, name: &str) -> Option<TypeSpec> {
        self.entries.get(name).copied()
    }

    /// Resolve a possibly inline-qualified token to its type and bare name.
    pub fn resolve<'t>(&self, token: &'t str) -> Result<(TypeSpec, &'t str)> {
        if let Some(found) = parse_inline_declaration(token) {
            return Ok(found);
        }
        let name = token.trim();
        self.lookup(name)
            .map(|spec| (spec, name))
            .ok_or_else(|| Error::BadDeclaration(format!("undeclared token \"{name}\"")))
    }
}
