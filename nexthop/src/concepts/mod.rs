pub mod neighbour;
pub mod node;
pub mod prefix;
pub mod route;
