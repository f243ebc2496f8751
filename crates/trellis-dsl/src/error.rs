use thiserror::Error;
use trellis_dom::{DomError, Name};

/// Errors raised while building a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DslError {
    /// The name has no factory in the builder's registry.
    #[error("undefined builder method '{0}'")]
    Unregistered(Name),

    /// Content was added while no element was open.
    #[error("no open container to add to")]
    NoContainer,

    /// A node could not be created.
    #[error(transparent)]
    Dom(#[from] DomError),
}
