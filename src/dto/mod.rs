pub mod account_dto;
pub mod admin_dto;
pub mod dossier_dto;
