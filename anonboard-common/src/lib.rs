pub mod content;
pub mod identity;
pub mod lifetime;
pub mod model;
pub mod util;
