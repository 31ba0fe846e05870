use thiserror::Error;

/// Why an import document was rejected. The collection is never touched when
/// one of these is returned.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read import file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("import is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("import must be a JSON array of tasks, found {found}")]
    NotAnArray { found: &'static str },

    #[error("task #{index} does not match the task shape: {source}")]
    InvalidTask {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("task id '{id}' appears more than once (task #{index})")]
    DuplicateId { id: String, index: usize },
}

/// Failures of the local key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error on stored key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for '{key}' is not a valid task list: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode tasks: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Name of a JSON value's type, for error messages
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
