//! Asset processing error types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse error category, used for matching without inspecting payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Corrupt,
    InvalidInput,
    Io,
}

/// Errors raised by the metadata store, transforms and container writers.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("`{0}` does not exist")]
    NotFound(PathBuf),

    #[error("corrupt metadata `{path}`: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error on `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AssetError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Corrupt { .. } => ErrorKind::Corrupt,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Wrap an image codec error. IO failures keep their path.
    pub fn image(path: &Path, source: image::ImageError) -> Self {
        match source {
            image::ImageError::IoError(e) => Self::io(path, e),
            other => Self::InvalidInput(format!("`{}`: {other}", path.display())),
        }
    }

    /// Wrap an IO error, mapping `NotFound` onto [`AssetError::NotFound`].
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

pub type AssetResult<T> = Result<T, AssetError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind as IoKind};

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let err = AssetError::io(
            Path::new("icon.svg"),
            Error::new(IoKind::NotFound, "missing"),
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("icon.svg"));
    }

    #[test]
    fn test_io_permission_stays_io() {
        let err = AssetError::io(
            Path::new("icon.svg"),
            Error::new(IoKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_image_error_mapping() {
        let io = image::ImageError::IoError(Error::new(IoKind::NotFound, "missing"));
        assert_eq!(AssetError::image(Path::new("a.png"), io).kind(), ErrorKind::NotFound);

        let decode = image::ImageError::Unsupported(
            image::error::UnsupportedError::from_format_and_kind(
                image::error::ImageFormatHint::Unknown,
                image::error::UnsupportedErrorKind::Format(image::error::ImageFormatHint::Unknown),
            ),
        );
        let err = AssetError::image(Path::new("a.png"), decode);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("a.png"));
    }

    #[test]
    fn test_corrupt_display() {
        let err = AssetError::corrupt(Path::new("a.svg.gsam"), "missing field `id`");
        let display = err.to_string();
        assert!(display.contains("a.svg.gsam"));
        assert!(display.contains("missing field"));
    }
}
