//! Pixel-grid search problems built from decoded images.
//!
//! Every pixel is a state; edges join each pixel to its up-to-eight
//! neighbours and cost more the further apart the two colours are. See
//! [`edge_cost`].

mod problem;

pub use problem::{ImageError, ImageProblem, PATH_COLOR, edge_cost};
