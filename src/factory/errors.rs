use std::fmt;

use crate::config::model::ConfigKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// `create` was handed a kind that is not independently servable.
    UnsupportedResource(ConfigKind),
    /// A script's `actions` list (or an `onComplete` list) held a node that
    /// is not a script action.
    NotAnAction(ConfigKind),
    /// Byte injection requested for a kind without an injection strategy.
    UnsupportedInjection(ConfigKind),
    /// Byte injection only works on text bodies.
    BinaryInjection(ConfigKind),
    /// The requested size is below the smallest body the padding syntax can
    /// produce.
    InjectionTargetTooSmall { target: usize, minimum: usize },
    /// Rendered page markup had no `<body>...</body>` region to work with.
    /// Page rendering always emits one, so this is an internal bug.
    MissingBodyRegion,
    /// A redirect action is terminal and cannot carry an `onComplete`
    /// continuation.
    RedirectWithContinuation,
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryError::UnsupportedResource(kind) => {
                write!(f, "{} is not a servable network resource", kind)
            }
            FactoryError::NotAnAction(kind) => {
                write!(f, "expected a script action, found {}", kind)
            }
            FactoryError::UnsupportedInjection(kind) => {
                write!(f, "{} not supported for byte injection", kind)
            }
            FactoryError::BinaryInjection(kind) => {
                write!(f, "{} has a binary body, byte injection needs text", kind)
            }
            FactoryError::InjectionTargetTooSmall { target, minimum } => {
                write!(
                    f,
                    "cannot inject to {} bytes, smallest producible body is {} bytes",
                    target, minimum
                )
            }
            FactoryError::MissingBodyRegion => {
                write!(f, "failed to locate a <body> region in rendered page markup")
            }
            FactoryError::RedirectWithContinuation => {
                write!(f, "redirect actions are terminal and cannot have onComplete actions")
            }
        }
    }
}

impl std::error::Error for FactoryError {}
