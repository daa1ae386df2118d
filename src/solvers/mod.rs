pub mod primal;
pub mod trivial;
