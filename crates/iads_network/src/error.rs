use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IadsError {
    #[error("read file failed ({path}): {message}")]
    ReadFile { path: String, message: String },
    #[error("parse config failed ({path}): {message}")]
    ParseConfig { path: String, message: String },
    #[error("parse scenario failed ({path}): {message}")]
    ParseScenario { path: String, message: String },
    /// Adjacency entry that is neither a bare name nor a name-to-list mapping.
    #[error("invalid iads config entry #{index}: {message}")]
    InvalidConfigEntry { index: usize, message: String },
    /// A participating group with no alive unit and no static placement.
    /// Liveness bookkeeping has diverged if this is ever raised.
    #[error("{group} has no skynet usable units")]
    NoUsableUnit { group: String },
}
