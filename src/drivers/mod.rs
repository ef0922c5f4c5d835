//! Input drivers that sit below the game loop.

pub mod team_buttons;
