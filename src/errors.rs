use thiserror::Error;

/// Configuration-time validation failures.
///
/// All of these are raised synchronously while a binding is being created
/// or replaced; a failed registration leaves the previously registered
/// binding for that `(element, argument)` slot untouched. Dispatch-time
/// misses are not errors.
#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("malformed key spec: {0}")]
    MalformedKeySpec(#[from] keyspec::ParseError),

    #[error("unknown option '{option}'; known options: {known}")]
    UnknownOption { option: String, known: String },

    #[error("keys property not found")]
    MissingKeys,

    #[error("no configuration found")]
    MissingConfiguration,
}
