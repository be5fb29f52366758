#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("cannot build a merkle tree with no leaves")]
    EmptyTree,
    #[error("index {0} not found in tree")]
    UnknownIndex(u32),
    #[error("recomputed {0} does not match")]
    Mismatch(&'static str),
    #[error("merkle proof for index {0} does not verify")]
    InvalidProof(u32),
    #[error("invalid vector parameters: {0}")]
    InvalidParams(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid sampling parameters: {0}")]
    InvalidParams(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid seed: {0}")]
    InvalidSeed(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error(transparent)]
    Verify(#[from] VerifyError),
}
