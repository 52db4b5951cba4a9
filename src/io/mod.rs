pub mod task_io;

pub use task_io::*;
