pub mod cli;
pub mod codegen;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod source;
pub mod store;

pub use cli::{Cli, Commands, EntityArg};
pub use pipeline::{CodeStrategy, ImportContext, RunReport};
pub use source::Sources;
pub use store::Store;
