//! Minimal CLI: load schema documents → (closure | docs)
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use crate::docs::NamedTypeInfo;
use crate::ir::{NamedKind, TypeSignature};
use crate::registry::SchemaRegistry;
use crate::schema_de::{self, SchemaDocument};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// discover the named types referenced by a service schema and render documentation models
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// log at debug level (overridden by DOCS_SCHEMA_LOG)
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print the named types each struct references
    Closure(ClosureOut),
    /// emit the JSON documentation model
    Docs(DocsOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select the schema inside each document (e.g. /service/schema)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct ClosureOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// only this struct (may repeat)
    #[arg(long = "type", short = 't')]
    types: Vec<String>,

    /// follow references through the registry until nothing new turns up
    #[arg(long)]
    transitive: bool,

    /// print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(clap::Parser, Debug)]
struct DocsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// list everything reachable on each page, not only direct references
    #[arg(long)]
    transitive: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_registry(&self) -> Result<SchemaRegistry> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .map_err(|e| anyhow!("failed to resolve input file paths: {e}"))?;
        let mut docs = Vec::with_capacity(source_paths.len());
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path).map_err(|source| crate::Error::Io {
                path: source_path_str.clone(),
                source,
            })?;
            docs.push(self.decode(&source_path_str, &source)?);
            info!(path = %source_path_str, "loaded schema document");
        }
        SchemaRegistry::from_documents(docs).context("invalid schema")
    }

    fn decode(&self, source_name: &str, source: &str) -> Result<SchemaDocument> {
        let Some(pointer) = self.json_pointer.as_deref() else {
            return Ok(schema_de::from_str_with_path(source_name, source)?);
        };
        let mut json_value = serde_json::from_str::<serde_json::Value>(source)
            .with_context(|| format!("failed to parse JSON source file ({source_name})"))?;
        let selected = json_value
            .pointer_mut(pointer)
            .map(serde_json::Value::take)
            .ok_or_else(|| anyhow!("JSON pointer {pointer} matched nothing in {source_name}"))?;
        Ok(schema_de::from_value_with_path(source_name, selected)?)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Closure(target) => {
                let registry = target.input_settings.load_registry()?;
                let closures: Vec<(String, Vec<TypeSignature>)> = if target.types.is_empty() {
                    registry.closures(target.transitive)?
                } else {
                    target
                        .types
                        .iter()
                        .map(|name| {
                            let closure = closure_of(&registry, name, target.transitive)?;
                            Ok((name.clone(), closure))
                        })
                        .collect::<Result<_>>()?
                };

                if target.json {
                    let out: indexmap::IndexMap<&str, &[TypeSignature]> = closures
                        .iter()
                        .map(|(name, types)| (name.as_str(), types.as_slice()))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&out)?);
                } else {
                    for (name, types) in &closures {
                        println!("{}", name.bold());
                        for sig in types {
                            println!("  {}", paint(&registry, sig));
                        }
                    }
                }
            }
            Command::Docs(target) => {
                let registry = target.input_settings.load_registry()?;
                let model = crate::render::documentation(&registry, target.transitive)?;
                let docs_src = serde_json::to_string_pretty(&model)?;
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, &docs_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    let structs = model.structs.len();
                    info!(path = %out.display(), structs, "wrote documentation model");
                } else {
                    println!("{docs_src}");
                }
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn closure_of(
    registry: &SchemaRegistry,
    name: &str,
    transitive: bool,
) -> Result<Vec<TypeSignature>> {
    if transitive {
        return Ok(registry.transitive_named_types(name)?);
    }
    let ty = registry.get(name).ok_or_else(|| crate::Error::UnknownType(name.to_string()))?;
    Ok(ty.find_named_types())
}

/// Structs cyan, enums yellow, anything the registry can't resolve red.
fn paint(registry: &SchemaRegistry, sig: &TypeSignature) -> colored::ColoredString {
    let name = sig.name();
    match sig.as_named().map(|n| (n.kind(), registry.get(n.name()).is_some())) {
        Some((_, false)) => name.red(),
        Some((NamedKind::Struct, true)) => name.cyan(),
        Some((NamedKind::Enum, true)) => name.yellow(),
        None => name.normal(),
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                return Err(format!("glob pattern matched no files: {pattern}").into());
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    // sorted, deduplicated: overlapping patterns must not load a file twice
    out.sort();
    out.dedup();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths_pass_through_sorted_and_deduped() {
        let out = resolve_file_path_patterns(["b.json", "a.json", "b.json"]).unwrap();
        assert_eq!(out, [PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }

    #[test]
    fn empty_glob_is_an_error() {
        assert!(resolve_file_path_patterns(["/definitely/not/here/*.json"]).is_err());
    }

    #[test]
    fn parses_closure_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "docs-schema", "closure", "-i", "schema.json", "--type", "Order", "--transitive",
        ])
        .unwrap();
        match cli.cmd {
            Command::Closure(c) => {
                assert_eq!(c.types, ["Order"]);
                assert!(c.transitive);
                assert!(!c.json);
            }
            Command::Docs(_) => panic!("expected closure"),
        }
    }
}
