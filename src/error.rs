use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for mask search operations.
pub type MaskSearchResult<T> = Result<T, MaskSearchError>;

/// The error type for everything around the matcher: argument parsing,
/// image I/O and report encoding. The matching core itself never fails.
#[derive(Debug, Error)]
pub enum MaskSearchError {
    #[error("Failed to load image {path:?}: {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image {path:?}: {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Invalid value '{value}' for {name}")]
    InvalidArgument { name: &'static str, value: String },

    #[error("Missing required argument: {name}")]
    MissingArgument { name: &'static str },

    #[error("Unknown argument: {flag}")]
    UnknownFlag { flag: String },

    #[error("Failed to write match report: {source}")]
    ReportOutput { source: std::io::Error },

    #[error("Failed to encode match report: {source}")]
    ReportEncoding {
        #[from]
        source: serde_json::Error,
    },
}

impl MaskSearchError {
    /// Errors caused by the command line rather than by the files or the search.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            MaskSearchError::InvalidArgument { .. }
                | MaskSearchError::MissingArgument { .. }
                | MaskSearchError::UnknownFlag { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_classification() {
        assert!(MaskSearchError::MissingArgument { name: "MainImage" }.is_usage_error());
        assert!(
            MaskSearchError::UnknownFlag {
                flag: "--bogus".to_string()
            }
            .is_usage_error()
        );

        let io = MaskSearchError::ImageLoad {
            path: PathBuf::from("missing.png"),
            source: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such file",
            )),
        };
        assert!(!io.is_usage_error());
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = MaskSearchError::InvalidArgument {
            name: "tolerance",
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value 'abc' for tolerance");
    }
}
