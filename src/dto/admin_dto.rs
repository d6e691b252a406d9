use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RoleForm {
    pub user_id: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhitelistForm {
    pub user_id: String,
    /// `"true"` to unblock, anything else blocks.
    pub whitelist: String,
}

impl WhitelistForm {
    pub fn enabled(&self) -> bool {
        matches!(self.whitelist.trim().to_ascii_lowercase().as_str(), "true" | "on" | "1")
    }
}
