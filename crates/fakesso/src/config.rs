use std::env;

use fakesso_core::settings::{SettingKey, Settings};

/// Environment variable each setting is read from.
pub fn env_var(key: SettingKey) -> &'static str {
    match key {
        SettingKey::ShowKnownUsers => "SHOW_KNOWN",
        SettingKey::AdditionalFields => "ADDITIONAL_FIELDS",
        SettingKey::ClientSecret => "CLIENT_SECRET",
        SettingKey::StoreLocation => "DB_FILE",
    }
}

/// Load settings from environment variables.
///
/// Environment variables:
/// - `SHOW_KNOWN` - List known identities on the authorize form (default: true)
/// - `ADDITIONAL_FIELDS` - Repeat `sub` as `id` on `/me` (default: true)
/// - `CLIENT_SECRET` - Secret required on `/token` when non-empty (default: empty)
/// - `DB_FILE` - SQLite identity table path (default: "/data/users.sqlite")
pub fn settings_from_env() -> Settings {
    settings_from(|name| env::var(name).ok())
}

/// Load settings through an arbitrary variable lookup.
pub fn settings_from<F>(lookup: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    Settings::resolve(|key| lookup(env_var(key)))
}
