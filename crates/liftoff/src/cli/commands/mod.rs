//! CLI commands

mod notes;
mod release;
mod rollback;
mod validate;

pub use notes::NotesCommand;
pub use release::ReleaseCommand;
pub use rollback::RollbackRecordCommand;
pub use validate::ValidateCommand;
