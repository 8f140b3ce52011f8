pub mod config;
pub mod error;
pub mod input;
pub mod joiner;
pub mod record;
pub mod summary;

pub use config::JoinConfig;
pub use error::*;
pub use input::Input;
pub use joiner::{join_inputs, JoinedDocument, JoinedDocuments, Joiner};
pub use summary::{InputSummary, JoinSummary, JoinWarning};
