pub mod enumerator;
pub mod gate;
pub mod loader;
pub mod pipeline;
pub mod resolver;
pub mod writer;
