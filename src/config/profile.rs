use super::Settings;

const FALLBACK_PROFILE: &str = "default";

/// Picks the profile name: explicit flag, then the saved default, then `default`.
pub fn resolve_profile(requested: Option<&str>, settings: &Settings) -> String {
    let requested = requested.map(str::trim).filter(|name| !name.is_empty());
    if let Some(name) = requested {
        return name.to_string();
    }

    settings
        .default_profile
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_PROFILE)
        .to_string()
}
