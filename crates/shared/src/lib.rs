pub mod backtrace;
pub mod paths;
pub mod popup;
pub mod utils;
