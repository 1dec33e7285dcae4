//! Config sources, applied in precedence order: global file, explicit file, environment.

pub mod environment;
pub mod global_file;
