pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An edge or a query referenced a node id absent from the model.
    #[error("Unknown node: {id}")]
    UnknownNode { id: String },

    /// A structural invariant was violated. Indicates a defect in traversal
    /// logic, not a recoverable caller error; the offending pass is aborted.
    #[error("Internal consistency violation: {message}")]
    InternalConsistency { message: String },
}
