//! Compiler error types.
//!
//! Compiling a prompt never fails: every extractor has a fallback.  The
//! variants below cover the fallible edges around the pipeline: building the
//! cue tables, validating configuration, and checking a finished definition.

/// Unified error type for the workflow compiler.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    // -- Construction --------------------------------------------------------
    /// A cue pattern could not be compiled into a matcher.
    #[error("invalid cue pattern `{pattern}`: {reason}")]
    InvalidCue { pattern: String, reason: String },

    /// The compiler configuration is unusable.
    #[error("invalid compiler configuration: {reason}")]
    Config { reason: String },

    // -- Definition checks ---------------------------------------------------
    /// Two nodes in one definition share an id.
    #[error("duplicate node id: {id}")]
    DuplicateNodeId { id: String },

    /// A connection references a node that is not part of the definition.
    #[error("connection {connection} references unknown node {node}")]
    DanglingConnection { connection: String, node: String },

    /// The connection graph contains a cycle, so no topological order exists.
    #[error("cycle detected among nodes: {}", remaining.join(", "))]
    CycleDetected { remaining: Vec<String> },

    // -- Catalog -------------------------------------------------------------
    /// A string does not name any tag of the given kind.
    #[error("unknown {kind} tag: {tag}")]
    UnknownTag { kind: &'static str, tag: String },
}

/// Convenience alias used throughout the compiler crate.
pub type Result<T> = std::result::Result<T, CompileError>;
