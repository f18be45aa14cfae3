use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::{DescriptionInfo, FieldInfo, NamedTypeInfo};
use crate::closure;
use crate::error::{Error, Result};
use crate::ir::{self, TypeSignature};

/// Metadata about a struct type.
///
/// Built once at registration time and never mutated. Two structs are equal
/// when their names and field sequences are; the description is cosmetic and
/// excluded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructInfo {
    name: String,
    fields: Vec<FieldInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description_info: Option<DescriptionInfo>,
}

impl StructInfo {
    /// Fields are copied out of `fields` in order. Field names must be unique.
    pub fn new(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = FieldInfo>,
    ) -> Result<Self> {
        let name = name.into();
        ir::validate_type_name(&name)?;
        let fields: Vec<FieldInfo> = fields.into_iter().collect();
        if let Some(dup) = super::first_duplicate(fields.iter().map(FieldInfo::name)) {
            let field = dup.to_string();
            return Err(Error::DuplicateField { owner: name, field });
        }
        Ok(Self { name, fields, description_info: None })
    }

    pub fn with_description(mut self, description_info: DescriptionInfo) -> Self {
        self.description_info = Some(description_info);
        self
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Field called `name`, if any.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name() == name)
    }
}

impl NamedTypeInfo for StructInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description_info(&self) -> Option<&DescriptionInfo> {
        self.description_info.as_ref()
    }

    fn find_named_types(&self) -> Vec<TypeSignature> {
        closure::find_named_types(self.fields.iter().map(FieldInfo::type_signature))
    }
}

impl PartialEq for StructInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

impl Eq for StructInfo {}

impl Hash for StructInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.fields.hash(state);
    }
}

impl fmt::Display for StructInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ------------------------------- Tests ------------------------------------ //
