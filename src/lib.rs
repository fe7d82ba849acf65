#![doc = "PolyMerge public API"]
mod error;
mod io;
mod poly;

pub mod cli;
pub mod commands;

#[doc(inline)]
pub use error::MergeError;

#[doc(inline)]
pub use io::{Feature, FeatureGeometry, read_from_geojson_bytes, write_to_geojson_bytes};

#[doc(inline)]
pub use poly::{PolyRecord, ReduceStats, Registry, absorb, buffer, flatten, reduce};
