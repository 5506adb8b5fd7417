pub mod aggregate;
pub mod normalize;

pub use aggregate::*;
pub use normalize::{normalize_dispatch, normalize_item};
