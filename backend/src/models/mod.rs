pub mod audience;
pub mod macros;
pub mod record;
pub mod time_window;

pub use audience::*;
pub use record::*;
pub use time_window::*;
