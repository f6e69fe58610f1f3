//! manifestquery - Semantic queries over Android manifests
//!
//! This library answers questions about an AndroidManifest.xml without
//! building the app: which activity is the launcher, which components are
//! guarded by which permission, what permissions are requested, and which
//! SDK level the app targets.
//!
//! # Architecture
//!
//! 1. **Discovery** - Find the AndroidManifest.xml in a project tree
//! 2. **Parsing** - Parse the XML into a navigable tree with quick-xml
//! 3. **Indexing** - Wrap the tree in a [`ManifestIndex`] keyed by package
//! 4. **Queries** - Resolve class names, launcher, components, permissions, SDK
//! 5. **Reporting** - Output results to the terminal or as JSON

pub mod config;
pub mod discovery;
pub mod manifest;
pub mod parser;
pub mod report;

pub use config::Config;
pub use discovery::FileFinder;
pub use manifest::{
    resolve_class_name, ComponentKind, ComponentProtection, ManifestError, ManifestIndex,
    ManifestSummary,
};
pub use parser::xml::{Document, Element};
pub use report::{QueryOutput, Report, ReportFormat, Reporter};
