pub mod nav;
pub mod registry;
pub mod view;

pub use nav::*;
pub use registry::*;
pub use view::*;
