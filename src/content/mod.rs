pub mod types;
pub mod blocks;
pub mod html;

pub use types::*;
pub use blocks::*;
pub use html::*;
