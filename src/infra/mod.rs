//! Инфраструктурный слой вокруг движка Big Two:
//! RNG-реализации для перемешивания колоды.

pub mod rng;

pub use rng::*;
