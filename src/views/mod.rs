pub mod detail;
pub mod list;
pub mod login;
pub mod render;
pub mod route;

pub use detail::*;
pub use list::*;
pub use login::*;
pub use route::*;
