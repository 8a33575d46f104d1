use std::path::PathBuf;

/// Result type alias for the generator's fatal conditions
pub type Result<T> = std::result::Result<T, GenError>;

/// Conditions that abort a generator run.
///
/// Every variant carries enough context (file, declaration name) to locate the offending
/// source. None of them is ever downgraded to a warning.
#[derive(Debug)]
pub enum GenError {
    Parse { file: PathBuf, message: String },
    /// Two qualifying structs share a name.
    DuplicateStruct {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
    /// A route handler that code outside its module cannot call.
    UnexportedHandler {
        file: PathBuf,
        owner: String,
        method: String,
    },
    /// A qualifying struct lives in a file with no importable module path.
    UnresolvedModulePath { file: PathBuf, reason: String },
    InvalidArgument(String),
    Serialization(String),
    /// The generated initializer did not form a valid syntax tree.
    Codegen(String),
}

impl std::fmt::Display for GenError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GenError::Parse { file, message } => {
                write!(f, "failed to parse {}: {}", file.display(), message)
            }
            GenError::DuplicateStruct {
                name,
                first,
                second,
            } => write!(
                f,
                "duplicate struct name `{}`: declared in {} and again in {}",
                name,
                first.display(),
                second.display()
            ),
            GenError::UnexportedHandler {
                file,
                owner,
                method,
            } => write!(
                f,
                "route handler `{}::{}` in {} must be public",
                owner,
                method,
                file.display()
            ),
            GenError::UnresolvedModulePath { file, reason } => write!(
                f,
                "cannot resolve the module path of {}: {}",
                file.display(),
                reason
            ),
            GenError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            GenError::Serialization(msg) => write!(f, "serialization error: {}", msg),
            GenError::Codegen(msg) => write!(f, "invalid generated code: {}", msg),
        }
    }
}

impl std::error::Error for GenError {}

impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        GenError::Serialization(format!("JSON: {}", err))
    }
}

impl From<syn::Error> for GenError {
    fn from(err: syn::Error) -> Self {
        GenError::Codegen(err.to_string())
    }
}
