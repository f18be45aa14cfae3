//! JSON documentation model handed to the docs renderer.
//!
//! Every optional description is omitted when absent, never rendered as `null`.
use serde::Serialize;

use crate::docs::{EnumInfo, NamedTypeInfo, StructInfo};
use crate::error::Result;
use crate::ir::TypeSignature;
use crate::registry::SchemaRegistry;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationModel<'a> {
    pub structs: Vec<StructPage<'a>>,
    pub enums: Vec<&'a EnumInfo>,
}

/// One struct plus the named types its page links to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructPage<'a> {
    #[serde(flatten)]
    pub info: &'a StructInfo,
    pub named_types: Vec<TypeSignature>,
}

/// Render the registry. With `transitive`, each page lists everything
/// reachable instead of only direct references.
pub fn documentation(
    registry: &SchemaRegistry,
    transitive: bool,
) -> Result<DocumentationModel<'_>> {
    let closures = registry.closures(transitive)?;
    let structs = registry
        .structs()
        .zip(closures)
        .map(|(info, (name, named_types))| {
            debug_assert_eq!(info.name(), name);
            StructPage { info, named_types }
        })
        .collect();
    Ok(DocumentationModel { structs, enums: registry.enums().collect() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema_de::{SchemaDocument, from_value_with_path};
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let doc: SchemaDocument = from_value_with_path("inline", json!({
            "structs": [
                {
                    "name": "Order",
                    "fields": [{ "name": "customer", "type": "optional<Customer>" }],
                    "descriptionInfo": { "docString": "An *order*.", "markup": "markdown" }
                },
                {
                    "name": "Customer",
                    "fields": [{ "name": "tier", "type": "Tier" }]
                }
            ],
            "enums": [{ "name": "Tier", "values": [{ "name": "GOLD" }] }]
        }))
        .unwrap();
        SchemaRegistry::from_documents([doc]).unwrap()
    }

    #[test]
    fn renders_pages_and_omits_missing_descriptions() {
        let reg = registry();
        let model = documentation(&reg, false).unwrap();
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({
                "structs": [
                    {
                        "name": "Order",
                        "fields": [{
                            "name": "customer",
                            "requirement": "unspecified",
                            "typeSignature": "optional<Customer>"
                        }],
                        "descriptionInfo": { "docString": "An *order*.", "markup": "markdown" },
                        "namedTypes": ["Customer"]
                    },
                    {
                        "name": "Customer",
                        "fields": [{
                            "name": "tier",
                            "requirement": "unspecified",
                            "typeSignature": "Tier"
                        }],
                        "namedTypes": ["Tier"]
                    }
                ],
                "enums": [{ "name": "Tier", "values": [{ "name": "GOLD" }] }]
            })
        );
    }

    #[test]
    fn transitive_pages_list_everything_reachable() {
        let reg = registry();
        let model = documentation(&reg, true).unwrap();
        let v = serde_json::to_value(&model).unwrap();
        assert_eq!(v["structs"][0]["namedTypes"], json!(["Customer", "Tier"]));
    }

    #[test]
    fn rendering_is_stable_across_runs() {
        let reg = registry();
        let a = serde_json::to_string(&documentation(&reg, true).unwrap()).unwrap();
        let b = serde_json::to_string(&documentation(&reg, true).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
