mod job;
mod probe;
mod report;
mod target;

pub use job::*;
pub use probe::*;
pub use report::*;
pub use target::*;
