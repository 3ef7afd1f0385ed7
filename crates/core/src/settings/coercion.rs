/// Coerce a raw source value into a boolean toggle.
///
/// `1`, `true`, `on` and `yes` (any case, surrounding whitespace ignored) are true.
/// Everything else, including the empty string, is false.
///
/// # Examples
///
/// ```
/// use fakesso_core::settings::parse_flag;
///
/// assert!(parse_flag("On"));
/// assert!(!parse_flag("off"));
/// assert!(!parse_flag("maybe"));
/// ```
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}
