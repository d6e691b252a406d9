pub mod details_service;
pub mod dossier_service;
pub mod export_service;
pub mod notification_service;
pub mod user_service;
