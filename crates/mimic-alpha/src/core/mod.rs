mod equality;
mod names;
mod string;

// equality
#[cfg(feature = "pyffi")]
pub use equality::close_enough;
pub use equality::to_eq_bits;
pub(crate) use equality::to_eq_coordinates;

// names
pub(crate) use names::{unpack, BASE_COLORS, CSS_COLORS, TABLEAU_COLORS};

// string
pub(crate) use string::{format, parse_cycle, parse_gray, parse_hashed};
