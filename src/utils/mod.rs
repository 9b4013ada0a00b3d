pub mod logging;
pub mod strings;

pub use strings::strings_between;
