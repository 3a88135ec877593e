//! Правила карточной игры Big Two (четыре игрока, колода из 52 карт).
//!
//! - `domain` – карты, колода, руки игроков, поле, стол;
//! - `eval` – классификация комбинаций и генерация допустимых ходов;
//! - `engine` – раунд: очередь ходов, проверка ходов, победитель;
//! - `players` – интерфейс принятия решений и компьютерный игрок;
//! - `infra` – RNG для раздачи.

pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod players;
