use hazardlens_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("{0} is not a candidate in this cluster")]
    NotACandidate(String),

    #[error("already comparing {0}; return to the list first")]
    AlreadyComparing(String),

    #[error("no candidate selected for comparison")]
    NotComparing,

    #[error(transparent)]
    Store(#[from] StoreError),
}
