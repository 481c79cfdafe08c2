//! Sandbox error types.
//!
//! Physics never fails; these cover the surface, icon resources, and the
//! JSON inputs (settings, catalog). Icon errors are logged and recovered by
//! the renderer; surface errors abort renderer construction.

use std::fmt;

/// Top-level error enum for the sandbox.
#[derive(Debug)]
pub enum SandboxError {
    /// No canvas element with the requested id exists in the document.
    CanvasNotFound {
        /// Element id that was looked up.
        id: String,
    },

    /// The canvas refused to hand out a 2D rendering context.
    NoContext,

    /// Icon reference does not name a `devicon-<name>-<style>` class.
    InvalidIconRef(String),

    /// Icon image failed to load.
    IconLoad {
        /// Resolved image URL.
        url: String,
        /// Loader-provided description of the failure.
        reason: String,
    },

    /// Persisted settings could not be parsed.
    Settings(serde_json::Error),

    /// Catalog JSON could not be parsed.
    Catalog(serde_json::Error),
}

impl fmt::Display for SandboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SandboxError::CanvasNotFound { id } => {
                write!(f, "no canvas element with id '{id}'")
            }
            SandboxError::NoContext => write!(f, "could not get 2D context from canvas"),
            SandboxError::InvalidIconRef(icon) => write!(f, "invalid devicon class: {icon}"),
            SandboxError::IconLoad { url, reason } => {
                write!(f, "failed to load icon {url}: {reason}")
            }
            SandboxError::Settings(e) => write!(f, "invalid settings: {e}"),
            SandboxError::Catalog(e) => write!(f, "invalid catalog: {e}"),
        }
    }
}

impl std::error::Error for SandboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SandboxError::Settings(e) | SandboxError::Catalog(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SandboxError> for wasm_bindgen::JsValue {
    fn from(e: SandboxError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display() {
        let e = SandboxError::CanvasNotFound {
            id: "canvas".to_string(),
        };
        assert_eq!(e.to_string(), "no canvas element with id 'canvas'");
        assert!(e.source().is_none());
    }

    #[test]
    fn test_json_errors_expose_source() {
        let Err(json) = serde_json::from_str::<u32>("nope") else {
            panic!("expected a parse error");
        };
        let e = SandboxError::Catalog(json);
        assert!(e.to_string().starts_with("invalid catalog: "));
        assert!(e.source().is_some());
    }
}
