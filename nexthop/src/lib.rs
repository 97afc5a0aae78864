pub mod concepts;
pub mod feedback;
pub mod framework;
pub mod resolver;
pub mod step;
pub mod util;
