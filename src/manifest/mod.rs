//! Semantic queries over an AndroidManifest.xml
//!
//! [`ManifestIndex`] parses a manifest once and answers questions about it:
//! the launcher activity, which components are guarded by which permission,
//! the requested permissions, and the effective target SDK. Every query walks
//! the tree again, so edits made through [`ManifestIndex::document_mut`] are
//! visible to the next query.

mod components;
mod error;
mod launcher;
mod names;

pub use components::{ComponentKind, ComponentProtection};
pub use error::{ManifestError, Result};
pub use names::resolve_class_name;

use crate::parser::xml::{Document, Element};
use serde::{Serialize, Serializer};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

pub(crate) const ROOT: &str = "/manifest";
pub(crate) const APPLICATION: &str = "/manifest/application";
const USES_PERMISSION: &str = "/manifest/uses-permission";
const USES_SDK: &str = "/manifest/uses-sdk";

pub(crate) const NAME: &str = "name";
const PACKAGE: &str = "package";
const TARGET_SDK_VERSION: &str = "targetSdkVersion";

const ANDROID_NAMESPACE_URI: &str = "http://schemas.android.com/apk/res/android";
const DEFAULT_ANDROID_PREFIX: &str = "android";

/// Lowest platform level reported by [`ManifestIndex::sdk_version`]
pub const MIN_SDK_VERSION: u32 = 3;

/// A parsed manifest with its package name
#[derive(Debug, Clone)]
pub struct ManifestIndex {
    document: Document,
    package: String,
    /// Prefix bound to the Android namespace on the root element
    android_prefix: String,
}

impl ManifestIndex {
    /// Load and index a manifest file
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let index = Self::from_bytes(&bytes)?;
        debug!(
            "Indexed manifest {} (package {}, {} elements)",
            path.display(),
            index.package,
            index.document.element_count()
        );
        Ok(index)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        std::str::from_utf8(bytes)?.parse()
    }

    /// Index an already parsed document.
    ///
    /// Fails when the root is not `<manifest>`, when it has no `package`
    /// attribute, or when there is no `<application>` element.
    pub fn from_document(document: Document) -> Result<Self> {
        let root = document
            .query(ROOT)
            .into_iter()
            .next()
            .ok_or(ManifestError::MissingRoot)?;

        let package = root
            .attribute(PACKAGE)
            .ok_or(ManifestError::MissingPackage)?
            .to_string();

        let android_prefix = root
            .attributes()
            .find(|(_, value)| *value == ANDROID_NAMESPACE_URI)
            .and_then(|(key, _)| key.strip_prefix("xmlns:"))
            .unwrap_or(DEFAULT_ANDROID_PREFIX)
            .to_string();

        if document.query(APPLICATION).is_empty() {
            return Err(ManifestError::MissingApplication);
        }

        Ok(Self {
            document,
            package,
            android_prefix,
        })
    }

    /// Package name from the root element
    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the tree for load-modify-save pipelines
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Resolve a class name against this manifest's package
    pub fn resolve(&self, name: &str) -> String {
        resolve_class_name(&self.package, name)
    }

    /// The `name` attribute of an element, falling back to `android:name`
    pub fn lookup_name<'d>(&self, element: Element<'d>) -> Option<&'d str> {
        self.lookup(element, NAME)
    }

    /// Look up an attribute by its bare name, then by its Android-namespaced name
    pub(crate) fn lookup<'d>(&self, element: Element<'d>, local: &str) -> Option<&'d str> {
        element
            .attribute(local)
            .or_else(|| element.attribute(&format!("{}:{}", self.android_prefix, local)))
    }

    pub(crate) fn application(&self) -> Option<Element<'_>> {
        self.document.query(APPLICATION).into_iter().next()
    }

    /// Fully qualified name of the custom `Application` class, if declared
    pub fn application_class_name(&self) -> Option<String> {
        let app = self.application()?;
        self.lookup_name(app).map(|name| self.resolve(name))
    }

    /// Requested permissions in document order, duplicates included
    pub fn permissions(&self) -> Vec<String> {
        self.document
            .query(USES_PERMISSION)
            .into_iter()
            .filter_map(|perm| {
                let name = self.lookup_name(perm);
                if name.is_none() {
                    debug!("Skipping <uses-permission> without a name");
                }
                name.map(str::to_string)
            })
            .collect()
    }

    /// Highest `targetSdkVersion` over all `<uses-sdk>` elements, never below
    /// [`MIN_SDK_VERSION`]
    pub fn sdk_version(&self) -> u32 {
        self.document
            .query(USES_SDK)
            .into_iter()
            .map(|sdk| self.lookup(sdk, TARGET_SDK_VERSION).map_or(0, leading_int))
            .fold(MIN_SDK_VERSION, u32::max)
    }

    /// Serialize the tree as it currently is
    pub fn to_xml_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.document.to_xml_bytes()?)
    }

    /// Write the tree to `path`, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<String> {
        let bytes = self.to_xml_bytes()?;
        std::fs::write(path, bytes).map_err(|source| ManifestError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Saved manifest to {}", path.display());
        Ok(format!("saved to {}", path.display()))
    }

    /// Run every query at once.
    ///
    /// Components are reported in the order of `component_tags`; a tag
    /// listed more than once is queried once.
    pub fn summary<S: AsRef<str>>(&self, component_tags: &[S]) -> ManifestSummary {
        let mut components: Vec<(String, ComponentProtection)> = Vec::new();
        for tag in component_tags.iter().map(|tag| tag.as_ref()) {
            if components.iter().any(|(seen, _)| seen == tag) {
                debug!("Component tag <{}> listed twice, skipping", tag);
                continue;
            }
            components.push((tag.to_string(), self.find_components(tag)));
        }

        ManifestSummary {
            package: self.package.clone(),
            application: self.application_class_name(),
            launcher: self.launcher(),
            sdk_version: self.sdk_version(),
            permissions: self.permissions(),
            components,
        }
    }
}

impl FromStr for ManifestIndex {
    type Err = ManifestError;

    fn from_str(contents: &str) -> Result<Self> {
        Self::from_document(Document::parse(contents)?)
    }
}

/// Results of all manifest queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestSummary {
    pub package: String,
    pub application: Option<String>,
    pub launcher: Option<String>,
    pub sdk_version: u32,
    pub permissions: Vec<String>,
    /// Protection results per component tag, in query order. Serialized as a
    /// map keyed by tag.
    #[serde(serialize_with = "serialize_components")]
    pub components: Vec<(String, ComponentProtection)>,
}

impl ManifestSummary {
    /// Protection result for one component tag
    pub fn component(&self, tag: &str) -> Option<&ComponentProtection> {
        self.components
            .iter()
            .find(|(name, _)| name == tag)
            .map(|(_, protection)| protection)
    }
}

fn serialize_components<S: Serializer>(
    components: &[(String, ComponentProtection)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(components.iter().map(|(tag, protection)| (tag, protection)))
}

/// Integer value of the leading decimal digits after an optional `+`; 0 when
/// there are none
fn leading_int(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
}
