use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown node kind: {0}")]
    UnknownKind(String),

    #[error("Kind {0} is a container and cannot be built as a leaf")]
    LeafKindRequired(String),

    #[error("Leaf node {0} cannot own children")]
    LeafWithChildren(String),

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Node id is reserved: {0}")]
    ReservedId(String),

    #[error("Node {id} is nested deeper than {max} levels")]
    TooDeep { id: String, max: usize },

    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }

    pub fn reserved_id(id: impl Into<String>) -> Self {
        Self::ReservedId(id.into())
    }
}
