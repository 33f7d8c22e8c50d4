mod list;
mod metric;
mod pod;
mod workloads;

pub use list::*;
pub use metric::*;
pub use pod::*;
pub use workloads::*;
