pub mod rich_text;
pub mod state;

pub use rich_text::*;
pub use state::*;
