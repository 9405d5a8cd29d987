//! Reconstructed candidate: a four-vector track plus its vertex.

use tuma_core::{ColumnDeclarer, FieldProducer, Producer, Result, Slot};

use crate::track::{LorentzColumns, LorentzVectorTrack};
use crate::vector::LorentzVector;

/// A reconstructed particle candidate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Candidate {
    pub momentum: LorentzVector,
    /// Distance of closest approach to the beam axis.
    pub r: f32,
    /// Vertex position along the beam axis.
    pub z: f32,
}

/// Setup options for [`CandidateTrack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CandidateOptions {
    pub columns: LorentzColumns,
    /// Declare the `R` and `Z` vertex columns. Off unless asked for, even
    /// when `columns` is empty.
    pub vertex: bool,
}

impl CandidateOptions {
    pub fn new(columns: LorentzColumns) -> Self {
        Self {
            columns,
            vertex: false,
        }
    }

    #[must_use]
    pub fn with_vertex(mut self, vertex: bool) -> Self {
        self.vertex = vertex;
        self
    }
}

/// [`LorentzVectorTrack`] columns plus `f32` vertex columns `R` and `Z`.
#[derive(Debug, Default)]
pub struct CandidateTrack {
    track: LorentzVectorTrack,
    r: Slot<f32>,
    z: Slot<f32>,
}

impl CandidateTrack {
    pub fn use_angles_deg(&mut self, use_deg: bool) {
        self.track.use_angles_deg(use_deg);
    }

    pub fn fill(&mut self, candidate: &Candidate) {
        self.track.fill(&candidate.momentum);
        self.r.set(candidate.r);
        self.z.set(candidate.z);
    }

    /// The underlying four-vector track.
    pub fn track(&self) -> &LorentzVectorTrack {
        &self.track
    }
}

impl FieldProducer for CandidateTrack {
    fn is_ready(&self) -> bool {
        self.track.is_ready()
    }

    fn set_ready(&mut self, ready: bool) {
        self.track.set_ready(ready);
    }

    fn clear(&mut self) {
        self.track.clear();
        self.r.clear();
        self.z.clear();
    }
}

impl Producer for CandidateTrack {
    type Options = CandidateOptions;

    fn declare_columns(columns: &mut ColumnDeclarer<'_>, options: CandidateOptions) -> Result<Self> {
        let track = LorentzVectorTrack::declare_columns(columns, options.columns)?;
        let candidate = Self {
            track,
            r: Slot::default(),
            z: Slot::default(),
        };
        if options.vertex {
            columns.declare("R", &candidate.r)?;
            columns.declare("Z", &candidate.z)?;
        }
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use tuma_core::ColumnType;

    use super::*;

    #[test]
    fn test_vertex_columns_are_opt_in() {
        let mut columns = ColumnDeclarer::new("_p1_");
        CandidateTrack::declare_columns(&mut columns, CandidateOptions::default()).unwrap();
        assert_eq!(columns.len(), 12);
        assert!(columns.columns().all(|(_, ty)| ty == ColumnType::F64));

        let selection = LorentzColumns::E | LorentzColumns::M;
        let mut columns = ColumnDeclarer::new("_p1_");
        CandidateTrack::declare_columns(
            &mut columns,
            CandidateOptions::new(selection).with_vertex(true),
        )
        .unwrap();
        let declared: Vec<_> = columns.columns().collect();
        assert_eq!(
            declared,
            vec![
                ("f_p1_E", ColumnType::F64),
                ("f_p1_M", ColumnType::F64),
                ("f_p1_R", ColumnType::F32),
                ("f_p1_Z", ColumnType::F32),
            ]
        );
    }

    #[test]
    fn test_readiness_follows_inner_track() {
        let mut candidate = CandidateTrack::default();
        assert!(!candidate.is_ready());

        candidate.fill(&Candidate {
            momentum: LorentzVector::new(0.1, 0.2, 0.9, 1.2),
            r: 0.5,
            z: -12.0,
        });
        assert!(candidate.is_ready());
        assert!(candidate.track().is_ready());
        assert_eq!(candidate.z.get(), -12.0);

        candidate.set_ready(false);
        candidate.clear();
        assert!(candidate.is_ready());
        assert_eq!(candidate.r.get(), 0.0);
        assert_eq!(candidate.track().energy(), 0.0);
    }
}
