pub mod dialogs;
pub mod navigation;

pub use dialogs::*;
pub use navigation::*;
