mod functions;
mod profile;
mod stats;

pub use functions::*;
pub use profile::*;
pub use stats::*;
