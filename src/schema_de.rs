//! Schema documents: the JSON input format for the CLI.
//!
//! ```json
//! {
//!   "structs": [{ "name": "Order", "fields": [{ "name": "lines", "type": "list<Line>" }] }],
//!   "enums":   [{ "name": "Status", "values": [{ "name": "OPEN", "intValue": 1 }] }]
//! }
//! ```
//!
//! Field types are type expressions (see [`crate::ir::parse`]). Names declared
//! in any loaded document resolve in every other one.
use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::docs::{
    DescriptionInfo, EnumInfo, EnumValueInfo, FieldInfo, FieldRequirement, StructInfo,
};
use crate::error::{Error, Result};
use crate::ir::NamedKind;
use crate::ir::parse::parse_type;
use crate::registry::SchemaRegistry;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaDocument {
    #[serde(default)]
    pub structs: Vec<StructDecl>,
    #[serde(default)]
    pub enums: Vec<EnumDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StructDecl {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    pub description_info: Option<DescriptionInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_expr: String,
    #[serde(default)]
    pub requirement: FieldRequirement,
    pub description_info: Option<DescriptionInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnumDecl {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValueDecl>,
    pub description_info: Option<DescriptionInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnumValueDecl {
    pub name: String,
    pub int_value: Option<i32>,
    pub description_info: Option<DescriptionInfo>,
}

// ————————————————————————————————————————————————————————————————————————————
// DECODING
// ————————————————————————————————————————————————————————————————————————————

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(source_name: &str, src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| decode_error(source_name, err))
}

/// Same as [`from_str_with_path`] but for an already parsed JSON tree.
pub fn from_value_with_path<T: DeserializeOwned>(
    source_name: &str,
    value: serde_json::Value,
) -> Result<T> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| decode_error(source_name, err))
}

fn decode_error<E>(source_name: &str, err: serde_path_to_error::Error<E>) -> Error
where
    E: std::fmt::Display,
{
    Error::Decode {
        source_name: source_name.to_string(),
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// REGISTRY BUILD
// ————————————————————————————————————————————————————————————————————————————

impl SchemaRegistry {
    /// Build a registry from one or more documents.
    ///
    /// Two passes: first collect every declared name (so forward and
    /// cross-document references resolve), then parse field types and
    /// construct the infos.
    pub fn from_documents<I>(docs: I) -> Result<Self>
    where
        I: IntoIterator<Item = SchemaDocument>,
    {
        let docs: Vec<SchemaDocument> = docs.into_iter().collect();

        let mut kinds: IndexMap<&str, NamedKind> = IndexMap::new();
        let declared = docs.iter().flat_map(|d| {
            let structs = d.structs.iter().map(|s| (s.name.as_str(), NamedKind::Struct));
            let enums = d.enums.iter().map(|e| (e.name.as_str(), NamedKind::Enum));
            structs.chain(enums)
        });
        for (name, kind) in declared {
            if kinds.insert(name, kind).is_some() {
                return Err(Error::DuplicateType(name.to_string()));
            }
        }
        let resolve = |name: &str| kinds.get(name).copied();

        let mut registry = SchemaRegistry::new();
        for doc in &docs {
            for decl in &doc.structs {
                registry.register(build_struct(decl, &resolve)?)?;
            }
            for decl in &doc.enums {
                registry.register(build_enum(decl)?)?;
            }
        }
        debug!(types = registry.len(), documents = docs.len(), "schema loaded");
        Ok(registry)
    }
}

fn build_struct<F>(decl: &StructDecl, resolve: &F) -> Result<StructInfo>
where
    F: Fn(&str) -> Option<NamedKind>,
{
    let fields = decl
        .fields
        .iter()
        .map(|f| build_field(f, resolve).map_err(|e| e.in_type(&decl.name)))
        .collect::<Result<Vec<_>>>()?;

    let mut info = StructInfo::new(decl.name.clone(), fields)?;
    if let Some(d) = &decl.description_info {
        info = info.with_description(d.clone());
    }
    Ok(info)
}

fn build_field<F>(decl: &FieldDecl, resolve: &F) -> Result<FieldInfo>
where
    F: Fn(&str) -> Option<NamedKind>,
{
    let sig = parse_type(&decl.type_expr, resolve)?;
    let mut field = FieldInfo::new(decl.name.clone(), sig)?.with_requirement(decl.requirement);
    if let Some(d) = &decl.description_info {
        field = field.with_description(d.clone());
    }
    Ok(field)
}

fn build_enum(decl: &EnumDecl) -> Result<EnumInfo> {
    let values = decl
        .values
        .iter()
        .map(|v| build_value(v).map_err(|e| e.in_type(&decl.name)))
        .collect::<Result<Vec<_>>>()?;

    let mut info = EnumInfo::new(decl.name.clone(), values)?;
    if let Some(d) = &decl.description_info {
        info = info.with_description(d.clone());
    }
    Ok(info)
}

fn build_value(decl: &EnumValueDecl) -> Result<EnumValueInfo> {
    let mut value = EnumValueInfo::new(decl.name.clone())?;
    if let Some(i) = decl.int_value {
        value = value.with_int_value(i);
    }
    if let Some(d) = &decl.description_info {
        value = value.with_description(d.clone());
    }
    Ok(value)
}

// ------------------------------- Tests ------------------------------------ //
