use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::{DescriptionInfo, NamedTypeInfo};
use crate::error::{Error, Result};
use crate::ir::{self, TypeSignature};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueInfo {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    int_value: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description_info: Option<DescriptionInfo>,
}

impl EnumValueInfo {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::MissingValue("enum value name"));
        }
        Ok(Self { name, int_value: None, description_info: None })
    }

    pub fn with_int_value(mut self, int_value: i32) -> Self {
        self.int_value = Some(int_value);
        self
    }

    pub fn with_description(mut self, description_info: DescriptionInfo) -> Self {
        self.description_info = Some(description_info);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn int_value(&self) -> Option<i32> {
        self.int_value
    }
    pub fn description_info(&self) -> Option<&DescriptionInfo> {
        self.description_info.as_ref()
    }
}

impl PartialEq for EnumValueInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.int_value == other.int_value
    }
}

impl Eq for EnumValueInfo {}

impl Hash for EnumValueInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.int_value.hash(state);
    }
}

/// Metadata about an enum type. Enums reference no other types.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumInfo {
    name: String,
    values: Vec<EnumValueInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description_info: Option<DescriptionInfo>,
}

impl EnumInfo {
    pub fn new(
        name: impl Into<String>,
        values: impl IntoIterator<Item = EnumValueInfo>,
    ) -> Result<Self> {
        let name = name.into();
        ir::validate_type_name(&name)?;
        let values: Vec<EnumValueInfo> = values.into_iter().collect();
        if let Some(dup) = super::first_duplicate(values.iter().map(EnumValueInfo::name)) {
            let field = dup.to_string();
            return Err(Error::DuplicateField { owner: name, field });
        }
        Ok(Self { name, values, description_info: None })
    }

    pub fn with_description(mut self, description_info: DescriptionInfo) -> Self {
        self.description_info = Some(description_info);
        self
    }

    pub fn values(&self) -> &[EnumValueInfo] {
        &self.values
    }
}

impl NamedTypeInfo for EnumInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description_info(&self) -> Option<&DescriptionInfo> {
        self.description_info.as_ref()
    }

    fn find_named_types(&self) -> Vec<TypeSignature> {
        Vec::new()
    }
}

impl PartialEq for EnumInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.values == other.values
    }
}

impl Eq for EnumInfo {}

impl Hash for EnumInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.values.hash(state);
    }
}

impl fmt::Display for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> EnumInfo {
        EnumInfo::new("Color", [
            EnumValueInfo::new("RED").unwrap().with_int_value(1),
            EnumValueInfo::new("GREEN").unwrap().with_int_value(2),
        ])
        .unwrap()
    }

    #[test]
    fn enum_has_no_named_types() {
        assert!(color().find_named_types().is_empty());
    }

    #[test]
    fn duplicate_values_are_rejected() {
        let a = EnumValueInfo::new("A").unwrap();
        let err = EnumInfo::new("Dup", [a.clone(), a]);
        assert!(matches!(err, Err(Error::DuplicateField { .. })));
    }

    #[test]
    fn serializes_only_present_optionals() {
        let e = color().with_description(DescriptionInfo::plain("Paint."));
        assert_eq!(
            serde_json::to_value(&e).unwrap(),
            serde_json::json!({
                "name": "Color",
                "values": [{ "name": "RED", "intValue": 1 }, { "name": "GREEN", "intValue": 2 }],
                "descriptionInfo": { "docString": "Paint.", "markup": "none" }
            })
        );
    }
}
