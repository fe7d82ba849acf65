mod bbox;
mod buffer;
mod merge;
mod normalize;
mod record;
mod registry;

pub use buffer::buffer;
pub use merge::{ReduceStats, absorb, reduce};
pub use normalize::flatten;
pub use record::PolyRecord;
pub use registry::Registry;
