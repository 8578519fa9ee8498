pub mod group;
pub mod node;
pub mod port;
pub mod tag;
pub mod value;

pub use group::*;
pub use node::*;
pub use port::*;
pub use tag::*;
pub use value::*;
