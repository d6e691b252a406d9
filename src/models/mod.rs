pub mod details;
pub mod dossier;
pub mod user;
