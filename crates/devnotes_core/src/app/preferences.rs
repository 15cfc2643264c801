//! Theme and text-zoom preferences with write-through persistence.

use crate::model::preferences::{ColorScheme, TextZoom, Theme};
use crate::repo::kv_repo::KvRepository;
use crate::repo::state_repo::StateRepository;
use crate::repo::RepoResult;
use log::info;

/// Host capability answering the ambient light/dark preference.
pub trait ColorSchemeSource {
    fn preferred_scheme(&self) -> ColorScheme;
}

/// Source that always answers the same scheme.
#[derive(Debug, Clone, Copy)]
pub struct FixedColorScheme(pub ColorScheme);

impl ColorSchemeSource for FixedColorScheme {
    fn preferred_scheme(&self) -> ColorScheme {
        self.0
    }
}

pub struct Preferences<R: KvRepository> {
    repo: StateRepository<R>,
    theme: Theme,
    text_zoom: TextZoom,
    scheme_source: Box<dyn ColorSchemeSource>,
}

impl<R: KvRepository> Preferences<R> {
    pub fn load(
        repo: StateRepository<R>,
        scheme_source: Box<dyn ColorSchemeSource>,
    ) -> RepoResult<Self> {
        let theme = repo.load_theme()?;
        let text_zoom = repo.load_text_zoom()?;
        Ok(Self {
            repo,
            theme,
            text_zoom,
            scheme_source,
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Scheme to render with; `System` asks the injected source.
    pub fn resolved_scheme(&self) -> ColorScheme {
        match self.theme {
            Theme::Light => ColorScheme::Light,
            Theme::Dark => ColorScheme::Dark,
            Theme::System => self.scheme_source.preferred_scheme(),
        }
    }

    /// Stores the literal choice.
    pub fn set_theme(&mut self, theme: Theme) -> RepoResult<()> {
        self.repo.save_theme(theme)?;
        self.theme = theme;
        info!("event=theme_set module=app status=ok theme={theme}");
        Ok(())
    }

    /// Switches to light when currently rendering dark, otherwise to dark.
    pub fn toggle_theme(&mut self) -> RepoResult<Theme> {
        let next = match self.resolved_scheme() {
            ColorScheme::Dark => Theme::Light,
            ColorScheme::Light => Theme::Dark,
        };
        self.set_theme(next)?;
        Ok(next)
    }

    pub fn text_zoom(&self) -> TextZoom {
        self.text_zoom
    }

    /// Raises zoom by one. Returns `None` (and writes nothing) at the maximum.
    pub fn zoom_in(&mut self) -> RepoResult<Option<TextZoom>> {
        self.step_zoom(self.text_zoom.zoomed_in())
    }

    /// Lowers zoom by one. Returns `None` (and writes nothing) at the minimum.
    pub fn zoom_out(&mut self) -> RepoResult<Option<TextZoom>> {
        self.step_zoom(self.text_zoom.zoomed_out())
    }

    fn step_zoom(&mut self, next: Option<TextZoom>) -> RepoResult<Option<TextZoom>> {
        let Some(next) = next else {
            return Ok(None);
        };
        self.repo.save_text_zoom(next)?;
        self.text_zoom = next;
        Ok(Some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedColorScheme, Preferences};
    use crate::model::preferences::{ColorScheme, TextZoom, Theme};
    use crate::repo::kv_repo::{KvRepository, MemoryKvRepository};
    use crate::repo::state_repo::{StateRepository, TEXT_ZOOM_KEY, THEME_KEY};

    fn prefs(kv: &MemoryKvRepository, scheme: ColorScheme) -> Preferences<MemoryKvRepository> {
        Preferences::load(
            StateRepository::new(kv.clone()),
            Box::new(FixedColorScheme(scheme)),
        )
        .unwrap()
    }

    #[test]
    fn system_theme_follows_injected_source() {
        let kv = MemoryKvRepository::new();
        assert_eq!(prefs(&kv, ColorScheme::Dark).resolved_scheme(), ColorScheme::Dark);
        assert_eq!(prefs(&kv, ColorScheme::Light).resolved_scheme(), ColorScheme::Light);
    }

    #[test]
    fn toggle_persists_literal_choice() {
        let kv = MemoryKvRepository::new();
        let mut prefs = prefs(&kv, ColorScheme::Dark);
        assert_eq!(prefs.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert_eq!(prefs.toggle_theme().unwrap(), Theme::Dark);

        prefs.set_theme(Theme::System).unwrap();
        assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("system"));
    }

    #[test]
    fn zoom_in_at_max_writes_nothing() {
        let kv = MemoryKvRepository::new();
        kv.put(TEXT_ZOOM_KEY, "5").unwrap();
        let mut prefs = prefs(&kv, ColorScheme::Light);
        kv.remove(TEXT_ZOOM_KEY).unwrap();

        assert_eq!(prefs.zoom_in().unwrap(), None);
        assert_eq!(prefs.text_zoom().level(), 5);
        assert_eq!(kv.get(TEXT_ZOOM_KEY).unwrap(), None);

        assert_eq!(prefs.zoom_out().unwrap(), Some(TextZoom::clamped(4)));
        assert_eq!(kv.get(TEXT_ZOOM_KEY).unwrap().as_deref(), Some("4"));
    }
}
