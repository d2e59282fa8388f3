//! CLI command implementations

mod lookup;
mod scan;
mod validate;

pub use lookup::lookup;
pub use scan::scan;
pub use validate::validate;
