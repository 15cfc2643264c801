//! Terminal stand-in for the "prefers dark color scheme" media query.

use devnotes_core::{ColorScheme, ColorSchemeSource};

const SCHEME_ENV: &str = "DEVNOTES_COLOR_SCHEME";

/// Reads `DEVNOTES_COLOR_SCHEME`, then the `COLORFGBG` hint set by many
/// terminals. Light when neither says otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvColorScheme;

impl ColorSchemeSource for EnvColorScheme {
    fn preferred_scheme(&self) -> ColorScheme {
        scheme_from(
            std::env::var(SCHEME_ENV).ok().as_deref(),
            std::env::var("COLORFGBG").ok().as_deref(),
        )
    }
}

fn scheme_from(explicit: Option<&str>, colorfgbg: Option<&str>) -> ColorScheme {
    match explicit.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("dark") => return ColorScheme::Dark,
        Some("light") => return ColorScheme::Light,
        _ => {}
    }
    // `fg;bg` or `fg;default;bg`; low ANSI background indexes are dark.
    let background = colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(0..=6) | Some(8) => ColorScheme::Dark,
        _ => ColorScheme::Light,
    }
}

#[cfg(test)]
mod tests {
    use super::scheme_from;
    use devnotes_core::ColorScheme;

    #[test]
    fn explicit_setting_wins() {
        assert_eq!(scheme_from(Some("Dark"), Some("0;15")), ColorScheme::Dark);
        assert_eq!(scheme_from(Some("light"), Some("15;0")), ColorScheme::Light);
    }

    #[test]
    fn colorfgbg_background_decides_otherwise() {
        assert_eq!(scheme_from(None, Some("15;0")), ColorScheme::Dark);
        assert_eq!(scheme_from(None, Some("0;default;15")), ColorScheme::Light);
        assert_eq!(scheme_from(Some("auto"), Some("garbage")), ColorScheme::Light);
        assert_eq!(scheme_from(None, None), ColorScheme::Light);
    }
}
