pub mod derive;
pub mod error;
