//! Terminal host glue: arguments, keyboard, bell and logging.

pub mod args;
pub mod audio;
pub mod keyboard;
pub mod logging;
