mod solve_trivial_problem;

pub use solve_trivial_problem::solve_trivial_problem;
