//! Terminal rendering of views, cards and notifications.
//!
//! Color is applied through `yansi`; when painting is disabled globally the
//! same functions produce plain text, which keeps test output stable.

use devnotes_core::app::format_timestamp;
use devnotes_core::search::{plain_text, preview_text};
use devnotes_core::service::editor_session::EditorSession;
use devnotes_core::{
    ActiveView, App, Category, CategoryColor, ColorScheme, KvRepository, Note, TextZoom, Theme,
};
use yansi::{Color, Paint};

/// Accent palette chosen from the resolved color scheme.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    accent: Color,
    muted: Color,
}

impl Renderer {
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Dark => Self {
                accent: Color::Cyan,
                muted: Color::BrightBlack,
            },
            ColorScheme::Light => Self {
                accent: Color::Blue,
                muted: Color::BrightBlack,
            },
        }
    }

    pub fn heading(&self, text: &str) -> String {
        text.fg(self.accent).bold().to_string()
    }

    pub fn hint(&self, text: &str) -> String {
        text.fg(self.muted).to_string()
    }

    pub fn toast(&self, message: &str) -> String {
        format!("{} {}", "✓".green().bold(), message)
    }

    pub fn warning(&self, message: &str) -> String {
        format!("{} {}", "!".yellow().bold(), message.yellow())
    }

    pub fn error(&self, message: &str) -> String {
        format!("{} {}", "✗".red().bold(), message.red())
    }

    /// The whole active view: heading plus grid, or the settings panel.
    pub fn view<R: KvRepository>(&self, app: &App<R>) -> String {
        let query = app.view().search_query.as_str();
        let mut out = match app.view().active_view {
            ActiveView::Settings => {
                return self.settings(app.theme(), app.resolved_scheme(), app.text_zoom())
            }
            ActiveView::Categories => self.heading("Categories"),
            ActiveView::Favorites => self.heading("Favorites"),
            ActiveView::Notes(_) => match app.active_category() {
                Some(category) => self.heading(&category.name),
                None => self.heading("Notes"),
            },
        };
        if !query.is_empty() {
            out.push_str(&self.hint(&format!("  search: \"{query}\"")));
        }
        out.push('\n');

        if app.view().active_view == ActiveView::Categories {
            let categories = app.visible_categories();
            if categories.is_empty() {
                out.push_str(&self.empty_state(
                    "No categories found",
                    query,
                    "Create your first category to get started organizing your notes.",
                    "categories",
                ));
            }
            for (index, category) in categories.iter().enumerate() {
                let count = app.store().note_count(category.id);
                out.push_str(&self.category_row(index + 1, category, count));
                out.push('\n');
            }
            return out;
        }

        let notes = app.visible_notes();
        if notes.is_empty() {
            out.push_str(&self.empty_state(
                "No notes found",
                query,
                "Create your first note with new-note.",
                "notes",
            ));
        }
        for (index, note) in notes.iter().enumerate() {
            out.push_str(&self.note_card(index + 1, note));
            out.push('\n');
        }
        out
    }

    fn empty_state(&self, title: &str, query: &str, first_run: &str, noun: &str) -> String {
        let detail = if query.is_empty() {
            first_run.to_string()
        } else {
            format!("No {noun} match \"{query}\". Try a different search term.")
        };
        format!("  {}\n  {}\n", title.bold(), self.hint(&detail))
    }

    /// One row of the categories grid: `  1. Name  (icon, 2 notes)`.
    pub fn category_row(&self, position: usize, category: &Category, note_count: usize) -> String {
        let noun = if note_count == 1 { "note" } else { "notes" };
        format!(
            "{:>3}. {}  {}",
            position,
            category.name.as_str().fg(category_color(category.color)).bold(),
            self.hint(&format!(
                "({}, {} {})",
                category.icon.short_name(),
                note_count,
                noun
            ))
        )
    }

    /// Two-line note card: title with markers, then the content preview.
    pub fn note_card(&self, position: usize, note: &Note) -> String {
        let mut markers = String::new();
        if note.is_pinned {
            markers.push_str(" [pinned]");
        }
        if note.is_favorite {
            markers.push_str(" [fav]");
        }
        let preview = preview_text(&note.content);
        format!(
            "{:>3}. {}{}\n     {}",
            position,
            note.title.as_str().bold(),
            markers.as_str().fg(self.accent),
            self.hint(if preview.is_empty() { "(empty)" } else { preview.as_str() })
        )
    }

    /// Full read-only view of one note.
    pub fn note_detail(&self, note: &Note, category: Option<&Category>, zoom: TextZoom) -> String {
        let category_line = match category {
            Some(category) => category
                .name
                .as_str()
                .fg(category_color(category.color))
                .to_string(),
            None => self.hint("(no category)"),
        };
        let mut flags = Vec::new();
        if note.is_pinned {
            flags.push("pinned");
        }
        if note.is_favorite {
            flags.push("favorite");
        }
        format!(
            "{}\n{}{}\n{}\n\n{}\n",
            self.heading(&note.title),
            category_line,
            if flags.is_empty() {
                String::new()
            } else {
                format!("  {}", self.hint(&format!("[{}]", flags.join(", "))))
            },
            self.hint(&format!(
                "Last updated: {}  ({})",
                format_timestamp(note.updated_at),
                zoom.css_class()
            )),
            plain_text(&note.content)
        )
    }

    pub fn settings(&self, theme: Theme, scheme: ColorScheme, zoom: TextZoom) -> String {
        let resolved = match scheme {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        };
        format!(
            "{}\n  theme: {} (rendering {})\n  text zoom: {} of {}\n{}",
            self.heading("Settings"),
            theme.as_str().fg(self.accent),
            resolved,
            zoom.level(),
            TextZoom::MAX,
            self.hint("  commands: theme [light|dark|system], zoom-in, zoom-out, export [FILE], clear")
        )
    }

    /// Editor status line: character count and undo/redo availability.
    pub fn editor_status(&self, session: &EditorSession) -> String {
        let history = session.history();
        self.hint(&format!(
            "{} characters | undo {} | redo {}",
            session.char_count(),
            if history.can_undo() { "yes" } else { "no" },
            if history.can_redo() { "yes" } else { "no" }
        ))
    }
}

fn category_color(color: CategoryColor) -> Color {
    match color {
        CategoryColor::Green => Color::Green,
        CategoryColor::Blue => Color::Blue,
        CategoryColor::Purple => Color::Magenta,
        CategoryColor::Orange => Color::Rgb(255, 159, 67),
        CategoryColor::Red => Color::Red,
        CategoryColor::Teal => Color::Cyan,
        CategoryColor::Gray => Color::BrightBlack,
    }
}
