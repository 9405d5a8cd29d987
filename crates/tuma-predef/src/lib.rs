//! Predefined producers for `tuma-core`.
//!
//! - [`LorentzVectorTrack`]: kinematics of a [`LorentzVector`], with a
//!   [`LorentzColumns`] selection of which column groups to declare
//! - [`CandidateTrack`]: the same plus vertex columns, built by composition

mod candidate;
mod track;
mod vector;

pub use candidate::{Candidate, CandidateOptions, CandidateTrack};
pub use track::{LorentzColumns, LorentzVectorTrack, RAD_TO_DEG, UnknownColumnGroup};
pub use vector::LorentzVector;
