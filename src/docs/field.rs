use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::DescriptionInfo;
use crate::error::{Error, Result};
use crate::ir::TypeSignature;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRequirement {
    Required,
    Optional,
    #[default]
    Unspecified,
}

/// One named, typed member of a struct.
///
/// Equality covers name, requirement and signature. The description is left
/// out so doc edits don't change identity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    name: String,
    requirement: FieldRequirement,
    type_signature: TypeSignature,
    #[serde(skip_serializing_if = "Option::is_none")]
    description_info: Option<DescriptionInfo>,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, type_signature: TypeSignature) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::MissingValue("field name"));
        }
        Ok(Self {
            name,
            requirement: FieldRequirement::Unspecified,
            type_signature,
            description_info: None,
        })
    }

    pub fn with_requirement(mut self, requirement: FieldRequirement) -> Self {
        self.requirement = requirement;
        self
    }

    pub fn with_description(mut self, description_info: DescriptionInfo) -> Self {
        self.description_info = Some(description_info);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn requirement(&self) -> FieldRequirement {
        self.requirement
    }
    pub fn type_signature(&self) -> &TypeSignature {
        &self.type_signature
    }
    pub fn description_info(&self) -> Option<&DescriptionInfo> {
        self.description_info.as_ref()
    }
}

impl PartialEq for FieldInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.requirement == other.requirement
            && self.type_signature == other.type_signature
    }
}

impl Eq for FieldInfo {}

impl Hash for FieldInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.requirement.hash(state);
        self.type_signature.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Primitive;

    #[test]
    fn empty_name_is_rejected() {
        let sig = TypeSignature::primitive(Primitive::Bool);
        assert!(matches!(FieldInfo::new("", sig), Err(Error::MissingValue(_))));
    }

    #[test]
    fn description_does_not_affect_equality() {
        let sig = TypeSignature::primitive(Primitive::Int32);
        let a = FieldInfo::new("id", sig.clone()).unwrap();
        let b = FieldInfo::new("id", sig)
            .unwrap()
            .with_description(DescriptionInfo::plain("the id"));
        assert_eq!(a, b);
        assert_ne!(a, b.clone().with_requirement(FieldRequirement::Required));
    }

    #[test]
    fn serializes_without_absent_description() {
        let f = FieldInfo::new("id", TypeSignature::primitive(Primitive::Int64))
            .unwrap()
            .with_requirement(FieldRequirement::Required);
        assert_eq!(
            serde_json::to_value(&f).unwrap(),
            serde_json::json!({ "name": "id", "requirement": "required", "typeSignature": "int64" })
        );
    }
}
