pub mod assistant;
pub mod error;
pub mod scout;
pub mod scripts;
pub mod sync;
pub mod youtube;
