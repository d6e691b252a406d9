pub mod crypto;
pub mod html;
pub mod upload;
pub mod validation;
