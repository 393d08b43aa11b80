mod code;
mod coding;
mod source;
mod tree;

pub use code::CodeCommands;
pub use coding::CodingCommands;
pub use source::{SourceCommands, SourceEditArgs, SourceField};
pub use tree::TreeCommands;
