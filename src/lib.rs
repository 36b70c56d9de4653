pub mod cli;
pub mod config;
pub mod html;
pub mod logging;
pub mod metadata;
pub mod parsers;
pub mod takeout;
pub mod util;
