/// Spherical quantities of a Cartesian query point, nondimensionalized by a
/// reference radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalFrame {
    /// Cosine of longitude.
    pub clam: f64,
    /// Sine of longitude.
    pub slam: f64,
    /// Cosine of colatitude.
    pub t: f64,
    /// Sine of colatitude, floored away from zero.
    pub u: f64,
    pub r: f64,
    /// `1 / r`, zero at the origin.
    pub inverse_r: f64,
    /// `a / r`, zero at the origin.
    pub q: f64,
}

impl SphericalFrame {
    pub fn from_cartesian(point: [f64; 3], reference_radius: f64, epsilon_floor: f64) -> Self {
        let [x, y, z] = point;
        let p = x.hypot(y);
        let r = z.hypot(p);

        let (clam, slam) = if p != 0.0 { (x / p, y / p) } else { (1.0, 0.0) };

        if r == 0.0 {
            tracing::debug!("query point at the origin, using equatorial defaults");
            return Self {
                clam,
                slam,
                t: 0.0,
                u: 1.0,
                r,
                inverse_r: 0.0,
                q: 0.0,
            };
        }

        if p == 0.0 {
            tracing::debug!(z, "query point on the polar axis, longitude pinned to zero");
        }

        Self {
            clam,
            slam,
            t: z / r,
            u: (p / r).max(epsilon_floor),
            r,
            inverse_r: r.recip(),
            q: reference_radius / r,
        }
    }

    pub fn tq(&self) -> f64 {
        self.t * self.q
    }

    pub fn uq(&self) -> f64 {
        self.u * self.q
    }

    pub fn q2(&self) -> f64 {
        self.q * self.q
    }

    pub fn uq2(&self) -> f64 {
        let uq = self.uq();
        uq * uq
    }

    /// Rotates `(dV/dr, dV/(r u dλ), dV/(r dθ))` into Cartesian components.
    pub fn rotate_to_cartesian(&self, radial: f64, longitude: f64, colatitude: f64) -> [f64; 3] {
        let meridional = self.u * radial + self.t * colatitude;
        [
            self.clam * meridional - self.slam * longitude,
            self.slam * meridional + self.clam * longitude,
            self.t * radial - self.u * colatitude,
        ]
    }
}
