//! Minimal Lorentz four-vector.

/// Four-momentum `(px, py, pz, E)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LorentzVector {
    px: f64,
    py: f64,
    pz: f64,
    e: f64,
}

impl LorentzVector {
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    pub fn px(&self) -> f64 {
        self.px
    }

    pub fn py(&self) -> f64 {
        self.py
    }

    pub fn pz(&self) -> f64 {
        self.pz
    }

    pub fn e(&self) -> f64 {
        self.e
    }

    pub fn set_e(&mut self, e: f64) {
        self.e = e;
    }

    pub fn set_pxyze(&mut self, px: f64, py: f64, pz: f64, e: f64) {
        *self = Self::new(px, py, pz, e);
    }

    /// Squared magnitude of the three-momentum.
    pub fn p2(&self) -> f64 {
        self.px * self.px + self.py * self.py + self.pz * self.pz
    }

    /// Magnitude of the three-momentum.
    pub fn p(&self) -> f64 {
        self.p2().sqrt()
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Invariant mass squared, `E² - p²`.
    pub fn m2(&self) -> f64 {
        self.e * self.e - self.p2()
    }

    /// Invariant mass. Space-like vectors get a negative mass.
    pub fn m(&self) -> f64 {
        let m2 = self.m2();
        if m2 < 0.0 { -(-m2).sqrt() } else { m2.sqrt() }
    }

    /// Polar angle in radians, zero for a null three-momentum.
    pub fn theta(&self) -> f64 {
        if self.px == 0.0 && self.py == 0.0 && self.pz == 0.0 {
            0.0
        } else {
            self.pt().atan2(self.pz)
        }
    }

    pub fn cos_theta(&self) -> f64 {
        self.theta().cos()
    }

    /// Azimuthal angle in radians, zero for a null transverse momentum.
    pub fn phi(&self) -> f64 {
        if self.px == 0.0 && self.py == 0.0 {
            0.0
        } else {
            self.py.atan2(self.px)
        }
    }

    /// Rapidity along the z axis.
    pub fn rapidity(&self) -> f64 {
        0.5 * ((self.e + self.pz) / (self.e - self.pz)).ln()
    }

    /// Velocity `p / E`.
    pub fn beta(&self) -> f64 {
        self.p() / self.e
    }
}
