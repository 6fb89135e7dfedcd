// Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while converting a numeric literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    /// Neither a sized literal nor a plain decimal number.
    #[error("number conversion of {0:?} failed")]
    Malformed(String),
    /// A sized literal whose digits do not fit its radix (e.g. `8'd1F`).
    #[error("number conversion of {text:?} failed: digits are not valid in radix {radix}")]
    BadDigits { text: String, radix: u32 },
}

/// Errors that can occur while loading a description or generating a module.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error(transparent)]
    Literal(#[from] LiteralError),

    #[error("unknown register type {kind:?} for register {register:?}")]
    UnknownKind { register: String, kind: String },

    #[error("register {0:?} has zero width")]
    ZeroWidth(String),

    #[error("register group is missing a name")]
    MissingGroupName,

    #[error("malformed description: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl GeneratorError {
    /// Data problems that the lenient policy reports and recovers from.
    /// Everything else always aborts generation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GeneratorError::Literal(_)
                | GeneratorError::UnknownKind { .. }
                | GeneratorError::ZeroWidth(_)
        )
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
