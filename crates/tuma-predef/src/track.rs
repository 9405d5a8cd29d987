//! Track producer for a Lorentz four-vector.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;
use tuma_core::{ColumnDeclarer, FieldProducer, Producer, Result, Slot};

use crate::vector::LorentzVector;

/// Degrees per radian.
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Column groups a [`LorentzVectorTrack`] can declare.
///
/// An empty selection enables every group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LorentzColumns(u16);

impl LorentzColumns {
    pub const E: Self = Self(1 << 0);
    pub const M: Self = Self(1 << 1);
    pub const P: Self = Self(1 << 2);
    pub const THETA: Self = Self(1 << 3);
    pub const COS_THETA: Self = Self(1 << 4);
    pub const PHI: Self = Self(1 << 5);
    pub const Y: Self = Self(1 << 6);
    pub const PT: Self = Self(1 << 7);
    /// `Px`, `Py` and `Pz` together.
    pub const PV: Self = Self(1 << 8);
    pub const BETA: Self = Self(1 << 9);
    pub const ALL: Self = Self((1 << 10) - 1);

    const NAMES: [(&'static str, Self); 10] = [
        ("E", Self::E),
        ("M", Self::M),
        ("P", Self::P),
        ("Theta", Self::THETA),
        ("CosTheta", Self::COS_THETA),
        ("Phi", Self::PHI),
        ("Y", Self::Y),
        ("Pt", Self::PT),
        ("Pv", Self::PV),
        ("Beta", Self::BETA),
    ];

    /// The empty selection, which means "everything".
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every group in `other` is selected.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether `group` gets columns under this selection.
    pub const fn enables(self, group: Self) -> bool {
        self.is_empty() || self.contains(group)
    }

    /// Names of the groups this selection enables.
    pub fn group_names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .into_iter()
            .filter(move |&(_, group)| self.enables(group))
            .map(|(name, _)| name)
    }
}

impl BitOr for LorentzColumns {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for LorentzColumns {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for LorentzColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("all");
        }
        let names: Vec<_> = self.group_names().collect();
        f.write_str(&names.join(","))
    }
}

/// Unknown column group name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown column group '{0}' (expected one of E, M, P, Theta, CosTheta, Phi, Y, Pt, Pv, Beta)")]
pub struct UnknownColumnGroup(pub String);

impl FromStr for LorentzColumns {
    type Err = UnknownColumnGroup;

    /// Parse a comma-separated list of group names, case-insensitively.
    /// `all` and the empty string select everything.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut selection = Self::empty();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if token.eq_ignore_ascii_case("all") {
                selection |= Self::ALL;
                continue;
            }
            let group = Self::NAMES
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(token))
                .map(|&(_, group)| group)
                .ok_or_else(|| UnknownColumnGroup(token.to_string()))?;
            selection |= group;
        }
        Ok(selection)
    }
}

/// Kinematic columns of one four-vector.
///
/// All buffers are `f64`. Angles are stored in radians unless
/// [`use_angles_deg`](Self::use_angles_deg) is set.
#[derive(Debug)]
pub struct LorentzVectorTrack {
    angle_scale: f64,
    e: Slot<f64>,
    m: Slot<f64>,
    p: Slot<f64>,
    px: Slot<f64>,
    py: Slot<f64>,
    pz: Slot<f64>,
    theta: Slot<f64>,
    cos_theta: Slot<f64>,
    phi: Slot<f64>,
    y: Slot<f64>,
    pt: Slot<f64>,
    beta: Slot<f64>,
    ready: bool,
}

impl Default for LorentzVectorTrack {
    fn default() -> Self {
        Self {
            angle_scale: 1.0,
            e: Slot::default(),
            m: Slot::default(),
            p: Slot::default(),
            px: Slot::default(),
            py: Slot::default(),
            pz: Slot::default(),
            theta: Slot::default(),
            cos_theta: Slot::default(),
            phi: Slot::default(),
            y: Slot::default(),
            pt: Slot::default(),
            beta: Slot::default(),
            ready: false,
        }
    }
}

impl LorentzVectorTrack {
    /// Store `Theta` and `Phi` in degrees instead of radians.
    ///
    /// Applies from the next [`fill`](Self::fill); readiness is unchanged.
    pub fn use_angles_deg(&mut self, use_deg: bool) {
        self.angle_scale = if use_deg { RAD_TO_DEG } else { 1.0 };
    }

    pub fn angles_in_degrees(&self) -> bool {
        self.angle_scale != 1.0
    }

    /// Derive every buffer from `vector` and mark the track ready.
    pub fn fill(&mut self, vector: &LorentzVector) {
        self.e.set(vector.e());
        self.m.set(vector.m());
        self.p.set(vector.p());
        self.px.set(vector.px());
        self.py.set(vector.py());
        self.pz.set(vector.pz());
        self.theta.set(vector.theta() * self.angle_scale);
        self.cos_theta.set(vector.cos_theta());
        self.phi.set(vector.phi() * self.angle_scale);
        self.y.set(vector.rapidity());
        self.pt.set(vector.pt());
        self.beta.set(vector.beta());
        self.ready = true;
    }

    /// Current energy buffer.
    pub fn energy(&self) -> f64 {
        self.e.get()
    }
}

impl FieldProducer for LorentzVectorTrack {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    fn clear(&mut self) {
        for slot in [
            &self.e,
            &self.m,
            &self.p,
            &self.px,
            &self.py,
            &self.pz,
            &self.theta,
            &self.cos_theta,
            &self.phi,
            &self.y,
            &self.pt,
            &self.beta,
        ] {
            slot.clear();
        }
        self.ready = true;
    }
}

impl Producer for LorentzVectorTrack {
    type Options = LorentzColumns;

    fn declare_columns(columns: &mut ColumnDeclarer<'_>, selection: LorentzColumns) -> Result<Self> {
        let track = Self::default();
        if selection.enables(LorentzColumns::E) {
            columns.declare("E", &track.e)?;
        }
        if selection.enables(LorentzColumns::M) {
            columns.declare("M", &track.m)?;
        }
        if selection.enables(LorentzColumns::P) {
            columns.declare("P", &track.p)?;
        }
        if selection.enables(LorentzColumns::THETA) {
            columns.declare("Theta", &track.theta)?;
        }
        if selection.enables(LorentzColumns::COS_THETA) {
            columns.declare("CosTheta", &track.cos_theta)?;
        }
        if selection.enables(LorentzColumns::PHI) {
            columns.declare("Phi", &track.phi)?;
        }
        if selection.enables(LorentzColumns::Y) {
            columns.declare("Y", &track.y)?;
        }
        if selection.enables(LorentzColumns::PT) {
            columns.declare("Pt", &track.pt)?;
        }
        if selection.enables(LorentzColumns::PV) {
            columns.declare("Px", &track.px)?;
            columns.declare("Py", &track.py)?;
            columns.declare("Pz", &track.pz)?;
        }
        if selection.enables(LorentzColumns::BETA) {
            columns.declare("Beta", &track.beta)?;
        }
        debug!(
            producer = columns.producer(),
            selection = %selection,
            "declared four-vector columns"
        );
        Ok(track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(selection: LorentzColumns) -> Vec<String> {
        let mut columns = ColumnDeclarer::new("p1");
        LorentzVectorTrack::declare_columns(&mut columns, selection).unwrap();
        columns.columns().map(|(name, _)| name.to_string()).collect()
    }

    #[test]
    fn test_empty_selection_declares_everything() {
        assert_eq!(
            declared(LorentzColumns::empty()),
            vec![
                "fp1E",
                "fp1M",
                "fp1P",
                "fp1Theta",
                "fp1CosTheta",
                "fp1Phi",
                "fp1Y",
                "fp1Pt",
                "fp1Px",
                "fp1Py",
                "fp1Pz",
                "fp1Beta"
            ]
        );
        assert_eq!(
            declared(LorentzColumns::ALL),
            declared(LorentzColumns::empty())
        );
    }

    #[test]
    fn test_selection_gates_groups() {
        assert_eq!(declared(LorentzColumns::E), vec!["fp1E"]);
        assert_eq!(declared(LorentzColumns::COS_THETA), vec!["fp1CosTheta"]);
        assert_eq!(
            declared(LorentzColumns::PV | LorentzColumns::M),
            vec!["fp1M", "fp1Px", "fp1Py", "fp1Pz"]
        );
    }

    #[test]
    fn test_parse_selection() {
        let selection: LorentzColumns = "e, m,Phi,THETA".parse().unwrap();
        assert_eq!(
            selection,
            LorentzColumns::E | LorentzColumns::M | LorentzColumns::PHI | LorentzColumns::THETA
        );
        assert_eq!(selection.to_string(), "E,M,Theta,Phi");
        assert_eq!("".parse::<LorentzColumns>().unwrap(), LorentzColumns::empty());
        assert_eq!("all".parse::<LorentzColumns>().unwrap(), LorentzColumns::ALL);
        assert_eq!(
            "E,Mass".parse::<LorentzColumns>().unwrap_err(),
            UnknownColumnGroup("Mass".to_string())
        );
    }

    #[test]
    fn test_fill_clear_and_angle_units() {
        let mut track = LorentzVectorTrack::default();
        assert!(!track.is_ready());
        assert!(!track.angles_in_degrees());

        let vector = LorentzVector::new(1.0, 2.0, 3.0, 4.0);
        track.fill(&vector);
        assert!(track.is_ready());
        assert_eq!(track.energy(), 4.0);
        let radians = track.theta.get();

        track.use_angles_deg(true);
        assert!(track.is_ready());
        track.fill(&vector);
        assert!((track.theta.get() / radians - RAD_TO_DEG).abs() < 1e-9);
        assert_eq!(track.cos_theta.get(), vector.cos_theta());

        track.set_ready(false);
        track.clear();
        assert!(track.is_ready());
        assert_eq!(track.energy(), 0.0);
        assert_eq!(track.phi.get(), 0.0);
    }
}
