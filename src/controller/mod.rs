pub mod bungie;
pub mod health;
