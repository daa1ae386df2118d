/// Threshold below which reduced costs, pivot elements and coefficients count as zero.
pub const EPS: f64 = 1e-9;

/// Relative tolerance on the artificial variable of a row, scaled by the row's right-hand side.
pub const FEAS_TOL: f64 = 1e-7;

/// Column width of the iteration counter in log tables.
pub const ITER_WIDTH: usize = 9;

/// Column width of floating point values in log tables.
pub const VALUE_WIDTH: usize = 16;
