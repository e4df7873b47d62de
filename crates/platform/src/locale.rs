/// Locale used when nothing better is known.
pub const FALLBACK_LOCALE: &str = "en_US";

/// Provider for the system default locale, used when a session names no language.
pub trait LocaleProvider: Send + Sync {
    fn default_locale(&self) -> String;
}

pub struct FixedLocale(pub String);

impl LocaleProvider for FixedLocale {
    fn default_locale(&self) -> String {
        self.0.clone()
    }
}

/// Reads the POSIX locale environment (`LC_ALL`, `LC_MESSAGES`, `LANG`).
pub struct SystemLocale;

impl LocaleProvider for SystemLocale {
    fn default_locale(&self) -> String {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .into_iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| parse_posix_locale(&value))
            .unwrap_or_else(|| FALLBACK_LOCALE.to_string())
    }
}

/// `en_US.UTF-8@euro` -> `en_US`. `C` and `POSIX` carry no language.
fn parse_posix_locale(value: &str) -> Option<String> {
    let name = value.split(['.', '@']).next().unwrap_or_default().trim();
    match name {
        "" | "C" | "POSIX" => None,
        _ => Some(name.to_string()),
    }
}
