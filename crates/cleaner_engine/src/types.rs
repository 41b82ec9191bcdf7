use ego_tree::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0:?} does not belong to this document")]
    MissingNode(NodeId),
    #[error("node {0:?} is detached from the document")]
    Detached(NodeId),
    #[error("node {0:?} cannot hold or carry element data")]
    NotAnElement(NodeId),
    #[error("cannot move node {child:?} under its own descendant {parent:?}")]
    Cycle { parent: NodeId, child: NodeId },
    #[error("failed to parse serialized content: {0}")]
    Parse(String),
    #[error("failed to serialize node: {0}")]
    Serialize(String),
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

/// A node the redactor had to leave alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedNode {
    pub node: NodeId,
    pub reason: DomError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactReport {
    pub hidden: usize,
    pub skipped: Vec<SkippedNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Messages newly cleaned by this pass.
    pub cleaned: usize,
    pub skipped: Vec<SkippedNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRestore {
    pub element: NodeId,
    pub error: DomError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub restored: usize,
    pub failed: Vec<FailedRestore>,
}
