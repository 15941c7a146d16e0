//! Maps an image identifier from the pair table to a displayable resource.

use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// Where an image identifier resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// An existing file under the configured base directory.
    Path(PathBuf),
    /// A remote URL; existence is checked by the browser, not here.
    Url(String),
}

/// Identifier-to-resource mapping, in one of two mutually exclusive modes.
#[derive(Debug, Clone)]
pub enum ImageResolver {
    /// Serve files from a local directory; resolution fails when the file
    /// does not exist.
    LocalDir(PathBuf),
    /// Prefix identifiers with a base URL; resolution never fails.
    RemoteUrl(String),
}

impl ImageResolver {
    /// Resolve an identifier to its source.
    ///
    /// Identifiers must be plain file names; anything that could escape the
    /// base directory is rejected.
    pub fn resolve(&self, identifier: &str) -> Result<ImageSource, CoreError> {
        validate_identifier(identifier)?;
        match self {
            Self::LocalDir(base) => {
                let path = base.join(identifier);
                if path.is_file() {
                    Ok(ImageSource::Path(path))
                } else {
                    Err(CoreError::NotFound {
                        entity: "Image",
                        name: identifier.to_string(),
                    })
                }
            }
            Self::RemoteUrl(base) => Ok(ImageSource::Url(join_url(base, identifier))),
        }
    }

    /// The URL the browser should load for an identifier: a local serving
    /// route in directory mode, the absolute URL in remote mode.
    pub fn display_url(&self, identifier: &str) -> String {
        match self {
            Self::LocalDir(_) => format!("/images/{identifier}"),
            Self::RemoteUrl(base) => join_url(base, identifier),
        }
    }
}

fn validate_identifier(identifier: &str) -> Result<(), CoreError> {
    let suspicious = identifier.is_empty()
        || identifier.contains("..")
        || identifier.contains('/')
        || identifier.contains('\\')
        || Path::new(identifier).is_absolute();
    if suspicious {
        return Err(CoreError::Validation(format!(
            "Invalid image identifier '{identifier}'. Must be a plain file name"
        )));
    }
    Ok(())
}

fn join_url(base: &str, identifier: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), identifier)
}
