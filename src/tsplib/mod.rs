//! TSPLIB text formats.
//!
//! Reads 2D Euclidean instances (`NODE_COORD_SECTION`) and tour files
//! (`TOUR_SECTION`) as distributed with TSPLIB, e.g. `eil51.tsp` and
//! `eil51.opt.tour`. Node ids are 1-based in the files and 0-based in the
//! returned [`TspInstance`](crate::models::TspInstance) and
//! [`Tour`](crate::models::Tour).
//!
//! Distances are exact Euclidean; the integer rounding TSPLIB prescribes for
//! `EUC_2D` is not applied.
//!
//! # Reference
//!
//! Reinelt, G. (1991). "TSPLIB - A Traveling Salesman Problem Library",
//! *ORSA Journal on Computing* 3(4), 376-384.

mod parser;

pub use parser::{parse_instance, parse_tour, read_instance, read_tour};
