//! One-shot subcommands and helpers shared with the interactive shell.

use crate::render::Renderer;
use anyhow::{bail, Context, Result};
use devnotes_core::{ActiveView, App, CategoryId, KvRepository, TextZoom, Theme, UiEffect};
use std::path::Path;

pub const DEFAULT_EXPORT_FILE: &str = "devnotes-export.json";

/// Prints queued notifications and applies navigation/refresh effects.
///
/// Delays are not simulated: a terminal has nothing to animate.
pub fn apply_effects<R: KvRepository>(app: &mut App<R>, renderer: &Renderer) {
    for effect in app.drain_effects() {
        match effect {
            UiEffect::Toast(message) => println!("{}", renderer.toast(&message)),
            UiEffect::Navigate { view, .. } => {
                if app.navigate(view) {
                    print!("{}", renderer.view(app));
                }
            }
            UiEffect::Refresh { .. } => print!("{}", renderer.view(app)),
        }
    }
}

/// Resolves a 1-based position in the categories grid, a UUID, or a name.
pub fn resolve_category<R: KvRepository>(app: &App<R>, reference: &str) -> Option<CategoryId> {
    let reference = reference.trim();
    let categories = app.store().categories();
    if let Ok(position) = reference.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| categories.get(index))
            .map(|category| category.id);
    }
    if let Ok(id) = reference.parse::<CategoryId>() {
        return app.store().category(id).map(|category| category.id);
    }
    categories
        .iter()
        .find(|category| category.name.eq_ignore_ascii_case(reference))
        .map(|category| category.id)
}

pub fn list_view<R: KvRepository>(
    app: &mut App<R>,
    renderer: &Renderer,
    view: ActiveView,
    search: Option<&str>,
) {
    app.navigate(view);
    if let Some(query) = search {
        app.set_search(query);
    }
    print!("{}", renderer.view(app));
}

pub fn list_notes<R: KvRepository>(
    app: &mut App<R>,
    renderer: &Renderer,
    category: &str,
    search: Option<&str>,
) -> Result<()> {
    let Some(id) = resolve_category(app, category) else {
        bail!("category not found: {category}");
    };
    list_view(app, renderer, ActiveView::Notes(id), search);
    Ok(())
}

/// Writes the export document to `out` (default `devnotes-export.json`).
pub fn export<R: KvRepository>(
    app: &mut App<R>,
    renderer: &Renderer,
    out: Option<&Path>,
) -> Result<()> {
    let path = out.unwrap_or_else(|| Path::new(DEFAULT_EXPORT_FILE));
    let json = app.export_json()?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write export file {}", path.display()))?;
    apply_effects(app, renderer);
    println!("{}", renderer.hint(&path.display().to_string()));
    Ok(())
}

pub fn clear<R: KvRepository>(app: &mut App<R>, renderer: &Renderer, yes: bool) -> Result<()> {
    if !app.clear_all(yes)? {
        bail!("refusing to clear all data without --yes");
    }
    apply_effects(app, renderer);
    Ok(())
}

/// Shows the theme, or stores `theme` when given.
pub fn theme<R: KvRepository>(
    app: &mut App<R>,
    renderer: &Renderer,
    theme: Option<Theme>,
) -> Result<()> {
    if let Some(theme) = theme {
        app.set_theme(theme)?;
    }
    app.navigate(ActiveView::Settings);
    print!("{}", Renderer::for_scheme(app.resolved_scheme()).view(app));
    apply_effects(app, renderer);
    Ok(())
}

pub fn zoom<R: KvRepository>(app: &mut App<R>, renderer: &Renderer, zoom_in: bool) -> Result<()> {
    let changed = if zoom_in {
        app.zoom_in()?
    } else {
        app.zoom_out()?
    };
    if changed.is_none() {
        println!(
            "{}",
            renderer.hint(&format!(
                "Text zoom already at {} of {}",
                app.text_zoom().level(),
                TextZoom::MAX
            ))
        );
    }
    apply_effects(app, renderer);
    Ok(())
}
