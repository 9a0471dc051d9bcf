//! JSON API catalog generation
//!
//! Walks the registry and describes every enabled provider and endpoint,
//! including the request and response field tables and any worked examples.
//! The output is consumed by the documentation site.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::docs::tags::{parse_tags, Flag};
use crate::proxy::{Endpoint, Example, Provider, Registry};
use crate::schema::{FieldDefault, FieldSpec, TypeDesc};

/// Errors that abort a catalog run
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read examples file {path}: {source}")]
    ExamplesRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed examples file {path}: {source}")]
    ExamplesFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write catalog to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Providers keyed by identifier
pub type Catalog = IndexMap<String, ProviderDoc>;

#[derive(Debug, Clone, Serialize)]
pub struct ProviderDoc {
    pub name: String,
    pub description: Option<String>,
    /// Endpoints keyed by display name
    pub endpoints: IndexMap<String, EndpointDoc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointDoc {
    pub name: String,
    pub method: String,
    pub path: String,
    #[serde(rename = "nexuraPath")]
    pub nexura_path: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub original_docs_url: Option<String>,
    pub request_type: Vec<FieldDoc>,
    pub return_type: Vec<FieldDoc>,
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(rename = "genericType")]
    pub generic_type: String,
    pub description: String,
    pub default: Value,
    pub required: bool,
    pub disabled: Flag,
    pub hidden: Flag,
    pub additional_meta: Vec<String>,
    pub values: Option<FieldValues>,
}

/// Nested fields of a structured field
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FieldValues {
    Fields(Vec<FieldDoc>),
    /// One entry per object member of a union, keyed by type name
    Variants(IndexMap<String, Vec<FieldDoc>>),
}

/// Human readable rendering, e.g. `list of objects` or `map of str:int`
pub fn human_readable_type(ty: &TypeDesc) -> String {
    match ty {
        TypeDesc::Str => "str".to_string(),
        TypeDesc::Int => "int".to_string(),
        TypeDesc::Float => "float".to_string(),
        TypeDesc::Bool => "bool".to_string(),
        TypeDesc::Any => "Any".to_string(),
        TypeDesc::Literal(values) => values.join(", "),
        TypeDesc::List(inner) => {
            let all_objects = match inner.as_ref() {
                TypeDesc::Object { .. } => true,
                TypeDesc::Union(members) => {
                    !members.is_empty() && members.iter().all(TypeDesc::is_object)
                }
                _ => false,
            };
            if all_objects {
                "list of objects".to_string()
            } else {
                format!("list of {}", human_readable_type(inner))
            }
        }
        TypeDesc::Map(key, value) => format!(
            "map of {}:{}",
            human_readable_type(key),
            human_readable_type(value)
        ),
        TypeDesc::Union(members) => members
            .iter()
            .map(human_readable_type)
            .collect::<Vec<_>>()
            .join(", "),
        TypeDesc::Optional(inner) => format!("{}, None", human_readable_type(inner)),
        TypeDesc::Object { name, .. } => name.to_string(),
    }
}

/// Coarse category of a type, e.g. `List` rather than `list of str`
pub fn generic_type(ty: &TypeDesc) -> String {
    match ty {
        TypeDesc::Any => "Any".to_string(),
        TypeDesc::Union(_) | TypeDesc::Optional(_) => "Union".to_string(),
        TypeDesc::Literal(_) => "Literal".to_string(),
        TypeDesc::List(_) => "List".to_string(),
        TypeDesc::Map(_, _) => "Dict".to_string(),
        other => human_readable_type(other),
    }
}

fn default_value(default: &FieldDefault) -> Value {
    match default {
        FieldDefault::Missing => Value::Null,
        FieldDefault::Null => Value::String("null".to_string()),
        FieldDefault::Value(value) => value.clone(),
    }
}

fn nested_values(primary: &TypeDesc) -> Option<FieldValues> {
    match primary {
        TypeDesc::Object { fields, .. } => Some(FieldValues::Fields(describe_fields(&fields()))),
        TypeDesc::Union(members) => {
            let variants: IndexMap<_, _> = members
                .iter()
                .filter_map(|member| match member {
                    TypeDesc::Object { name, fields } => {
                        Some((name.to_string(), describe_fields(&fields())))
                    }
                    _ => None,
                })
                .collect();

            if variants.is_empty() {
                None
            } else {
                Some(FieldValues::Variants(variants))
            }
        }
        _ => None,
    }
}

/// Describe one field
pub fn describe_field(spec: &FieldSpec) -> FieldDoc {
    let (ty, required) = match &spec.ty {
        TypeDesc::Optional(inner) => (inner.as_ref(), false),
        other => (other, true),
    };

    let primary = match ty {
        TypeDesc::List(inner) => inner.as_ref(),
        TypeDesc::Map(_, value) => value.as_ref(),
        other => other,
    };

    let tags = parse_tags(spec.description);

    FieldDoc {
        name: spec.name.to_string(),
        type_name: human_readable_type(ty),
        generic_type: generic_type(ty),
        description: tags.description,
        default: default_value(&spec.default),
        required,
        disabled: tags.disabled,
        hidden: tags.hidden,
        additional_meta: tags.additional_meta,
        values: nested_values(primary),
    }
}

/// Describe a field table
pub fn describe_fields(fields: &[FieldSpec]) -> Vec<FieldDoc> {
    fields.iter().map(describe_field).collect()
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Builds a [`Catalog`] from a registry
pub struct CatalogGenerator {
    api_url: String,
    examples_dir: PathBuf,
}

impl CatalogGenerator {
    /// `api_url` prefixes every `nexuraPath`; example files resolve against `examples_dir`
    pub fn new(api_url: &str, examples_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            examples_dir: examples_dir.into(),
        }
    }

    /// Describe every enabled provider and endpoint in registration order
    pub fn generate(&self, registry: &Registry) -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::new();

        for provider in registry.providers() {
            let Some(provider_id) = provider.id() else {
                continue;
            };
            if !provider.enabled {
                info!(provider_id = %provider_id, "Skipping provider because it is disabled");
                continue;
            }

            catalog.insert(provider_id.to_string(), self.provider_doc(provider_id, provider)?);
        }

        Ok(catalog)
    }

    fn provider_doc(&self, provider_id: &str, provider: &Provider) -> Result<ProviderDoc, CatalogError> {
        let mut endpoints = IndexMap::new();

        for (path, endpoint) in provider.endpoints() {
            if !endpoint.enabled {
                info!(endpoint = %endpoint.name, "Skipping endpoint because it is disabled");
                continue;
            }

            let doc = self.endpoint_doc(provider_id, path, endpoint)?;
            endpoints.insert(endpoint.name.clone(), doc);
        }

        Ok(ProviderDoc {
            name: provider.name.clone(),
            description: non_empty(&provider.description),
            endpoints,
        })
    }

    fn endpoint_doc(
        &self,
        provider_id: &str,
        path: &str,
        endpoint: &Endpoint,
    ) -> Result<EndpointDoc, CatalogError> {
        debug!(provider_id = %provider_id, endpoint = %endpoint.name, "Describing endpoint");

        Ok(EndpointDoc {
            name: endpoint.name.clone(),
            method: endpoint.method.to_string(),
            path: path.to_string(),
            nexura_path: format!(
                "{}/{}/{}",
                self.api_url,
                provider_id,
                endpoint.id().unwrap_or_default()
            ),
            category: endpoint.category.clone(),
            description: non_empty(&endpoint.description),
            original_docs_url: endpoint.original_docs_url.clone(),
            request_type: describe_fields(&endpoint.kind.request_schema()),
            return_type: describe_fields(&endpoint.kind.response_schema()),
            examples: self.load_examples(endpoint)?,
        })
    }

    fn load_examples(&self, endpoint: &Endpoint) -> Result<Vec<Example>, CatalogError> {
        let Some(file) = &endpoint.examples else {
            return Ok(Vec::new());
        };

        let path = self.examples_dir.join(file);
        let raw = fs::read_to_string(&path).map_err(|source| CatalogError::ExamplesRead {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| CatalogError::ExamplesFormat { path, source })
    }
}

/// Serialize the catalog with four-space indentation
pub fn render_catalog(catalog: &Catalog) -> Result<Vec<u8>, CatalogError> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    catalog.serialize(&mut serializer)?;
    Ok(out)
}

/// Write the catalog to `path`, creating parent directories
pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<(), CatalogError> {
    let rendered = render_catalog(catalog)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, rendered).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })
}
