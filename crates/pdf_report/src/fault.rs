//! Sticky rendering faults.
//!
//! A [`Fault`] is recorded by a [`RenderSession`][crate::session::RenderSession] the first time
//! a session-wide problem is observed.  The session keeps it until it is finished; later faults
//! are discarded.

use std::fmt;

/// Category of a rendering fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// A drawing operation ran before any page was started.
    NoPage,
    /// The backend does not know the requested font family.
    UnknownFont,
    /// A style value is unusable (non-positive font size, negative line width, missing font).
    InvalidStyle,
    /// A cell or image box has negative or non-finite dimensions.
    InvalidGeometry,
    /// An image could not be read, decoded or placed.
    Image,
    /// The backend failed to create a page or process an operation.
    Backend,
    /// Producing the final document bytes failed.
    Finalize,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoPage => "no page",
            Self::UnknownFont => "unknown font",
            Self::InvalidStyle => "invalid style",
            Self::InvalidGeometry => "invalid geometry",
            Self::Image => "image",
            Self::Backend => "backend",
            Self::Finalize => "finalize",
        };
        f.write_str(name)
    }
}

/// The first failure observed by a render session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} fault: {message}")]
pub struct Fault {
    kind: FaultKind,
    message: String,
}

impl Fault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
