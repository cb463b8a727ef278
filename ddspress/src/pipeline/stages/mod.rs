//! Pipeline stage implementations.
//!
//! Each stage consumes the previous stage's work unit and passes sentinel
//! units through untouched, so a failed file keeps flowing until its slot
//! is accounted for. Loading runs serially in submission order; every other
//! stage runs in parallel across files.

mod decode;
mod encode;
mod load;
mod reblock;
mod write;

pub(crate) use decode::{decode, DecodeConfig};
pub(crate) use encode::encode;
pub(crate) use load::{load, RawFile};
pub(crate) use reblock::reblock;
pub(crate) use write::write;
