use serde::Deserialize;

// Parameters of one boundary node of the soil column
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct NodeParams {
    pub boundary_value: f64, // Prescribed pressure head at the boundary [cm]
    pub k_plus: f64,         // Hydraulic conductivity at the "+" half-step node [cm/day]
    pub k_minus: f64,        // Hydraulic conductivity at the "-" half-step node [cm/day]
    pub dz_plus: f64,        // Spacing to the "+" neighbour [cm]
    pub dz_minus: f64,       // Spacing to the "-" neighbour [cm]
    pub dt: f64,             // Time step [day]
    pub delta: f64,          // Column orientation angle [rad]
}

impl NodeParams {
    pub fn new(
        boundary_value: f64,
        k_plus: f64,
        k_minus: f64,
        dz_plus: f64,
        dz_minus: f64,
        dt: f64,
        delta: f64,
    ) -> Self {
        NodeParams {
            boundary_value,
            k_plus,
            k_minus,
            dz_plus,
            dz_minus,
            dt,
            delta,
        }
    }

    // Control volume half-width h = dz- + dz+/2 [cm]
    pub fn half_width(&self) -> f64 {
        self.dz_minus + self.dz_plus / 2.0
    }

    // Orientation scale factor 2^cos(delta), always > 0
    pub fn scale(&self) -> f64 {
        2f64.powf(self.delta.cos())
    }
}

/// One assembled row of the tridiagonal system.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StencilRow {
    pub upper: f64,
    pub main: f64,
    pub lower: f64,
    pub rhs: f64,
}

/// Coefficients contributed by a boundary node to the tridiagonal system.
///
/// Every method is a pure function of `p`. Degenerate inputs (zero spacing,
/// zero half-width) are not rejected: the division yields inf/NaN, which is
/// passed on to the caller unchanged.
pub trait BoundaryCondition {
    fn upper_diagonal(&self, p: &NodeParams) -> f64;
    fn main_diagonal(&self, p: &NodeParams) -> f64;
    fn lower_diagonal(&self, p: &NodeParams) -> f64;
    fn right_hand_side(&self, p: &NodeParams) -> f64;

    fn row(&self, p: &NodeParams) -> StencilRow {
        StencilRow {
            upper: self.upper_diagonal(p),
            main: self.main_diagonal(p),
            lower: self.lower_diagonal(p),
            rhs: self.right_hand_side(p),
        }
    }
}

// Dirichlet condition at the bottom of the column: the head below the node is fixed
#[derive(Clone, Copy, Debug, Default)]
pub struct BottomDirichlet;

// Divisions are applied left to right; reordering changes the rounding.
impl BoundaryCondition for BottomDirichlet {
    fn upper_diagonal(&self, p: &NodeParams) -> f64 {
        let h = p.half_width();
        let s = p.scale();
        -p.k_plus * p.dt / h / p.dz_plus / s
    }

    fn main_diagonal(&self, p: &NodeParams) -> f64 {
        let h = p.half_width();
        let s = p.scale();
        p.dt / h / p.dz_minus / s * p.k_minus + p.dt / h / p.dz_plus / s * p.k_plus
    }

    // Nothing lies beyond the boundary
    fn lower_diagonal(&self, _p: &NodeParams) -> f64 {
        0.0
    }

    fn right_hand_side(&self, p: &NodeParams) -> f64 {
        let h = p.half_width();
        let s = p.scale();
        p.dt / h * p.k_plus - p.dt / h * p.k_minus
            + p.k_minus * p.dt / h / p.dz_minus / s * p.boundary_value
    }
}
