extern crate clap;
extern crate derivative;
extern crate itertools;
#[macro_use]
extern crate lazy_static;
extern crate more_asserts;
#[cfg(feature = "cli")]
extern crate pbr;
extern crate prettytable;
extern crate rand;
extern crate rand_xoshiro;
extern crate serde;
#[macro_use]
extern crate serde_json;
extern crate thiserror;

pub mod bit_vector;
#[cfg(feature = "cli")]
pub mod cli;
pub mod example_patterns;
pub mod parity_matrix;
pub mod pattern_set;
pub mod syndrome_mapper;
pub mod util;
pub mod visualize;
