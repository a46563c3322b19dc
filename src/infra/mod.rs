//! Инфраструктурный слой вокруг движка:
//! - генерация ID;
//! - RNG-реализации для движка.

pub mod ids;
pub mod rng;

pub use ids::*;
pub use rng::*;
