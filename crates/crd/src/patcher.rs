//! Merging of catalog snippets into every version of a CRD

use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

use crate::catalog::{Catalog, ADAPTER_OVERRIDES_KEY, PUBLIC_KEY, SINK_KEY};
use crate::error::{PatchError, Result};
use crate::value::{self, PathError};

const VERSIONS_CONTEXT: &str = "unable to read spec.versions attribute";
const SPEC_CONTEXT: &str = "unable to read spec definition from OpenAPI schema";

/// Path from a version entry down to the custom resource's `spec` schema
const SPEC_SCHEMA_PATH: &[&str] = &["schema", "openAPIV3Schema", "properties", "spec"];

/// What happened to a single version entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionReport {
    /// `name` of the version entry, or its index when unnamed
    pub version: String,

    pub adapter_overrides_replaced: bool,

    /// `public` was removed from the desired `adapterOverrides` schema
    pub public_trimmed: bool,

    pub sink_replaced: bool,

    /// The optional-sink sentence was appended to the description
    pub sink_description_suffixed: bool,
}

/// Summary of a patch run, one entry per version in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    pub versions: Vec<VersionReport>,
}

impl PatchReport {
    /// Whether any version was modified
    pub fn changed(&self) -> bool {
        self.versions
            .iter()
            .any(|v| v.adapter_overrides_replaced || v.sink_replaced)
    }
}

/// Applies a [`Catalog`] to CRD documents
pub struct Patcher<'a> {
    catalog: &'a Catalog,
}

impl<'a> Patcher<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Patch `crd` and hand it back, or fail without producing a document.
    pub fn patch(&self, mut crd: Value) -> Result<Value> {
        self.patch_in_place(&mut crd)?;
        Ok(crd)
    }

    /// Patch `crd` in place.
    ///
    /// On error the document may be partially modified and should be discarded.
    pub fn patch_in_place(&self, crd: &mut Value) -> Result<PatchReport> {
        let versions =
            versions_mut(crd).map_err(|e| PatchError::schema_path(VERSIONS_CONTEXT, e))?;

        let mut report = PatchReport::default();
        for (index, version) in versions.iter_mut().enumerate() {
            report.versions.push(self.patch_version(index, version)?);
        }

        info!(
            versions = report.versions.len(),
            catalog = %self.catalog.variant(),
            "patched CRD"
        );
        Ok(report)
    }

    fn patch_version(&self, index: usize, version: &mut Value) -> Result<VersionReport> {
        let base = value::join_index("spec.versions", index);
        let mut report = VersionReport {
            version: version
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| index.to_string()),
            ..Default::default()
        };

        let spec = value::mapping_at_mut(version, &base, SPEC_SCHEMA_PATH)
            .map_err(|e| PatchError::schema_path(SPEC_CONTEXT, e))?;
        let sink_required = is_required(spec, SINK_KEY);

        let spec_path = value::join_key(&base, &SPEC_SCHEMA_PATH.join("."));
        let props_path = value::join_key(&spec_path, "properties");
        let props = spec
            .get_mut("properties")
            .ok_or_else(|| PathError::missing(&props_path))
            .and_then(|props| value::as_mapping_mut(props, &props_path))
            .map_err(|e| PatchError::schema_path(SPEC_CONTEXT, e))?;

        self.merge_adapter_overrides(props, &mut report);
        self.merge_sink(props, sink_required, &mut report);

        debug!(
            version = %report.version,
            adapter_overrides = report.adapter_overrides_replaced,
            public_trimmed = report.public_trimmed,
            sink = report.sink_replaced,
            sink_suffixed = report.sink_description_suffixed,
            "patched version"
        );
        Ok(report)
    }

    /// Replace an existing `adapterOverrides` schema wholesale.
    fn merge_adapter_overrides(&self, props: &mut Mapping, report: &mut VersionReport) {
        let Some(snippet) = self.catalog.adapter_overrides() else {
            return;
        };
        let Some(current) = value::present(props, ADAPTER_OVERRIDES_KEY) else {
            return;
        };

        // A version that predates the visibility toggle must not gain it.
        let has_public = current
            .get("properties")
            .and_then(Value::as_mapping)
            .and_then(|properties| value::present(properties, PUBLIC_KEY))
            .is_some();

        props.insert(ADAPTER_OVERRIDES_KEY.into(), snippet.desired(has_public));
        report.adapter_overrides_replaced = true;
        report.public_trimmed = !has_public;
    }

    /// Replace the `properties` of an existing `sink` schema, leaving its
    /// composition keywords as authored.
    fn merge_sink(&self, props: &mut Mapping, sink_required: bool, report: &mut VersionReport) {
        let Some(snippet) = self.catalog.sink() else {
            return;
        };
        let Some(sink) = value::present_mut(props, SINK_KEY).and_then(Value::as_mapping_mut) else {
            return;
        };
        if value::present(sink, "properties").is_none() {
            return;
        }

        sink.insert("properties".into(), snippet.properties());
        report.sink_replaced = true;

        if !sink_required {
            sink.insert(
                "description".into(),
                Value::String(snippet.optional_description()),
            );
            report.sink_description_suffixed = true;
        }
    }
}

fn versions_mut(crd: &mut Value) -> std::result::Result<&mut Vec<Value>, PathError> {
    let root = value::as_mapping_mut(crd, "document")?;
    let spec = value::present_mut(root, "spec").ok_or_else(|| PathError::missing("spec"))?;
    let spec = value::as_mapping_mut(spec, "spec")?;
    let versions =
        value::present_mut(spec, "versions").ok_or_else(|| PathError::missing("spec.versions"))?;
    value::as_sequence_mut(versions, "spec.versions")
}

/// Whether `field` is listed in the `required` sequence of `schema`
fn is_required(schema: &Mapping, field: &str) -> bool {
    schema
        .get("required")
        .and_then(Value::as_sequence)
        .is_some_and(|required| required.iter().any(|name| name.as_str() == Some(field)))
}
