use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or saving a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write manifest {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Manifest is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Document has no <manifest> root element")]
    MissingRoot,
    #[error("<manifest> element has no package attribute")]
    MissingPackage,
    #[error("<manifest> has no <application> element")]
    MissingApplication,
}

pub type Result<T> = std::result::Result<T, ManifestError>;
