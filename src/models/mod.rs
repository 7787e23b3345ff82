//! Domain model types for the Traveling Salesman Problem.
//!
//! Cities are immutable coordinates, tours are permutations of city
//! indices, and [`TspProblem`] is the distance oracle the search runs on.

mod city;
mod instance;
mod problem;
mod tour;

pub use city::City;
pub use instance::TspInstance;
pub(crate) use instance::validate_tour_for;
pub use problem::TspProblem;
pub use tour::{is_permutation, Tour};
