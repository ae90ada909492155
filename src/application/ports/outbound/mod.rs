//! Outbound ports - Interfaces that the application requires from external systems

mod bestiary_port;
mod repository_port;

pub use bestiary_port::{BestiaryPage, BestiaryPort, BestiaryQuery};
pub use repository_port::{ContentRepositoryPort, WorldRepositoryPort};
