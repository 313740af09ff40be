//! Release workflow steps

mod outputs;
mod release;
mod rollback;

pub use outputs::*;
pub use release::*;
pub use rollback::*;
