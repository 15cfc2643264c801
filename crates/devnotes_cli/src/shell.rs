//! Interactive shell. Each input line is one discrete UI event.
//!
//! # Invariants
//! - The editor debounce is polled before every event.
//! - Queued UI effects are applied after every event.

use crate::commands::{self, apply_effects, resolve_category};
use crate::markup::{self, Format};
use crate::render::Renderer;
use anyhow::{anyhow, bail, Result};
use devnotes_core::app::{CategoryForm, NoteForm, CLEAR_ALL_WARNING};
use devnotes_core::{
    ActiveView, App, CategoryColor, CategoryIcon, CategoryId, DeleteTarget, KvRepository, NoteId,
    Theme,
};
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::path::Path;

/// Whether the loop keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

enum Mode {
    Browse,
    Category(CategoryForm),
    Note(NoteForm),
}

/// Destructive request waiting for `confirm`. Only the latest one is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Delete,
    ClearAll,
}

pub struct Shell<R: KvRepository> {
    app: App<R>,
    renderer: Renderer,
    mode: Mode,
    pending: Option<Pending>,
}

impl<R: KvRepository> Shell<R> {
    pub fn new(app: App<R>) -> Self {
        let renderer = Renderer::for_scheme(app.resolved_scheme());
        Self {
            app,
            renderer,
            mode: Mode::Browse,
            pending: None,
        }
    }

    /// Runs the read-eval-print loop until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        let config = Config::builder()
            .history_ignore_space(true)
            .auto_add_history(true)
            .build();
        let mut editor: Editor<(), DefaultHistory> = Editor::with_config(config)?;

        println!(
            "{}  {}",
            self.renderer.heading("DevNotes"),
            self.renderer.hint("type help for commands")
        );
        self.print_view();

        loop {
            match editor.readline(&self.prompt()) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match self.handle_line(line) {
                        Ok(Flow::Continue) => {}
                        Ok(Flow::Exit) => break,
                        Err(err) => println!("{}", self.renderer.error(&format!("{err:#}"))),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!();
                    println!("{}", self.renderer.hint("(Interrupted - type quit to exit)"));
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    println!("{}", self.renderer.error(&format!("Input error: {err}")));
                    break;
                }
            }
        }

        println!("{}", self.renderer.hint("Goodbye!"));
        Ok(())
    }

    /// Handles one input line.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        self.app.editor_tick();
        let (command, rest) = split_command(line);
        debug!("event=shell_command module=cli status=start command={command}");

        match command {
            "quit" | "exit" | "q" => return Ok(Flow::Exit),
            "help" | "?" => {
                self.print_help();
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        match self.mode {
            Mode::Browse => self.browse(command, rest)?,
            Mode::Category(_) => self.edit_category(command, rest)?,
            Mode::Note(_) => self.edit_note(command, rest)?,
        }
        apply_effects(&mut self.app, &self.renderer);
        Ok(Flow::Continue)
    }

    fn browse(&mut self, command: &str, rest: &str) -> Result<()> {
        match command {
            "home" => self.show(ActiveView::Categories),
            "open" => {
                let id = self.category_arg(rest)?;
                self.show(ActiveView::Notes(id));
            }
            "favs" | "favorites" => self.show(ActiveView::Favorites),
            "settings" => self.show(ActiveView::Settings),
            "back" => {
                if self.app.active_note().is_some() {
                    self.app.close_note_view();
                    self.print_view();
                } else {
                    self.show(ActiveView::Categories);
                }
            }
            "ls" | "list" => self.print_view(),
            "search" => {
                self.app.set_search(rest);
                self.print_view();
            }
            "add-category" => self.open_category_form(None)?,
            "edit-category" => {
                let id = match (rest.is_empty(), self.app.view().active_category()) {
                    (true, Some(id)) => id,
                    _ => self.category_arg(rest)?,
                };
                self.open_category_form(Some(id))?;
            }
            "new-note" => {
                let form = self
                    .app
                    .open_note_form(None)
                    .ok_or_else(|| anyhow!("open a category first (open N)"))?;
                self.enter_note_mode(form);
            }
            "edit-note" => {
                let id = self.note_arg(rest)?;
                let form = self
                    .app
                    .open_note_form(Some(id))
                    .ok_or_else(|| anyhow!("note not found"))?;
                self.enter_note_mode(form);
            }
            "view" => {
                let id = self.note_arg(rest)?;
                if let Some(note) = self.app.view_note(id) {
                    let note = note.clone();
                    let category = self.app.store().category(note.category_id);
                    print!(
                        "{}",
                        self.renderer
                            .note_detail(&note, category, self.app.text_zoom())
                    );
                }
            }
            "pin" => {
                let id = self.note_arg(rest)?;
                self.app.toggle_pin(id)?;
                self.print_view();
            }
            "fav" => {
                let id = self.note_arg(rest)?;
                self.app.toggle_favorite(id)?;
            }
            "delete" => {
                self.pending = None;
                self.app.cancel_delete();
                let target = self.delete_target(rest)?;
                let warning = self
                    .app
                    .request_delete(target)
                    .ok_or_else(|| anyhow!("nothing to delete"))?;
                self.pending = Some(Pending::Delete);
                println!("{}", self.renderer.warning(warning));
                println!("{}", self.renderer.hint("type confirm or cancel"));
            }
            "confirm" => match self.pending.take() {
                Some(Pending::ClearAll) => {
                    self.app.clear_all(true)?;
                }
                Some(Pending::Delete) if self.app.confirm_delete()? => self.print_view(),
                _ => println!("{}", self.renderer.hint("Nothing to confirm")),
            },
            "cancel" => {
                self.pending = None;
                self.app.cancel_delete();
                println!("{}", self.renderer.hint("Cancelled"));
            }
            "theme" => {
                let theme = if rest.is_empty() {
                    self.app.toggle_theme()?
                } else {
                    let theme: Theme = rest.parse()?;
                    self.app.set_theme(theme)?;
                    theme
                };
                self.renderer = Renderer::for_scheme(self.app.resolved_scheme());
                println!("{}", self.renderer.hint(&format!("Theme: {theme}")));
            }
            "zoom-in" => commands::zoom(&mut self.app, &self.renderer, true)?,
            "zoom-out" => commands::zoom(&mut self.app, &self.renderer, false)?,
            "export" => {
                let out = (!rest.is_empty()).then(|| Path::new(rest));
                commands::export(&mut self.app, &self.renderer, out)?;
            }
            "clear" => {
                self.app.cancel_delete();
                self.pending = Some(Pending::ClearAll);
                println!("{}", self.renderer.warning(CLEAR_ALL_WARNING));
                println!("{}", self.renderer.hint("type confirm or cancel"));
            }
            other => bail!("unknown command `{other}`; type help"),
        }
        Ok(())
    }

    fn edit_category(&mut self, command: &str, rest: &str) -> Result<()> {
        let Mode::Category(form) = &mut self.mode else {
            return Ok(());
        };
        match command {
            "name" => form.name = rest.to_string(),
            "icon" => form.icon = Some(rest.parse()?),
            "color" => form.color = Some(rest.parse()?),
            "icons" => {
                let names: Vec<&str> = CategoryIcon::ALL.iter().map(|i| i.short_name()).collect();
                println!("{}", self.renderer.hint(&names.join(", ")));
                return Ok(());
            }
            "colors" => {
                let names: Vec<&str> = CategoryColor::ALL.iter().map(|c| c.name()).collect();
                println!("{}", self.renderer.hint(&names.join(", ")));
                return Ok(());
            }
            "show" => {}
            "save" => {
                if self.app.submit_category_form(form)? {
                    self.mode = Mode::Browse;
                    self.print_view();
                    return Ok(());
                }
            }
            "cancel" => {
                self.app.cancel_form();
                self.mode = Mode::Browse;
                self.print_view();
                return Ok(());
            }
            other => bail!("unknown form command `{other}`; type help"),
        }
        self.print_form();
        Ok(())
    }

    fn edit_note(&mut self, command: &str, rest: &str) -> Result<()> {
        let Mode::Note(form) = &mut self.mode else {
            return Ok(());
        };
        let current = self
            .app
            .editor()
            .map(|editor| editor.content().to_string())
            .unwrap_or_default();
        match command {
            "title" => form.title = rest.to_string(),
            "pin" => form.is_pinned = !form.is_pinned,
            "type" => self.app.editor_input(current + &markup::paragraph(rest)),
            "undo" => {
                if self.app.editor_undo().is_none() {
                    println!("{}", self.renderer.hint("Nothing to undo"));
                }
            }
            "redo" => {
                if self.app.editor_redo().is_none() {
                    println!("{}", self.renderer.hint("Nothing to redo"));
                }
            }
            "show" => {}
            "save" => {
                if self.app.submit_note_form(form)? {
                    self.mode = Mode::Browse;
                    self.print_view();
                    return Ok(());
                }
            }
            "cancel" => {
                self.app.cancel_form();
                self.mode = Mode::Browse;
                self.print_view();
                return Ok(());
            }
            other => match Format::from_command(other) {
                Some(format) => self.app.editor_format(current + &format.render(rest)),
                None => bail!("unknown editor command `{other}`; type help"),
            },
        }
        self.print_form();
        Ok(())
    }

    fn open_category_form(&mut self, editing: Option<CategoryId>) -> Result<()> {
        let form = self
            .app
            .open_category_form(editing)
            .ok_or_else(|| anyhow!("category not found"))?;
        self.mode = Mode::Category(form);
        self.print_form();
        Ok(())
    }

    fn enter_note_mode(&mut self, form: NoteForm) {
        self.mode = Mode::Note(form);
        self.print_form();
    }

    fn show(&mut self, view: ActiveView) {
        self.app.navigate(view);
        self.print_view();
    }

    fn print_view(&self) {
        print!("{}", self.renderer.view(&self.app));
    }

    fn print_form(&self) {
        match &self.mode {
            Mode::Browse => {}
            Mode::Category(form) => {
                let title = if self.app.view().editing_category_id().is_some() {
                    "Edit Category"
                } else {
                    "Add Category"
                };
                println!("{}", self.renderer.heading(title));
                println!("  name:  {}", form.name);
                println!(
                    "  icon:  {}",
                    form.icon.map_or("(none)", |icon| icon.short_name())
                );
                println!(
                    "  color: {}",
                    form.color.map_or("(none)", |color| color.name())
                );
            }
            Mode::Note(form) => {
                let title = if self.app.view().editing_note_id().is_some() {
                    "Edit Note"
                } else {
                    "Add Note"
                };
                println!("{}", self.renderer.heading(title));
                println!("  title:  {}", form.title);
                println!("  pinned: {}", if form.is_pinned { "yes" } else { "no" });
                if let Some(editor) = self.app.editor() {
                    println!(
                        "  {}",
                        devnotes_core::search::plain_text(editor.content())
                    );
                    println!("  {}", self.renderer.editor_status(editor));
                }
            }
        }
    }

    fn print_help(&self) {
        let text = match self.mode {
            Mode::Browse => BROWSE_HELP,
            Mode::Category(_) => CATEGORY_FORM_HELP,
            Mode::Note(_) => NOTE_EDITOR_HELP,
        };
        println!("{}", text.trim_end());
    }

    fn prompt(&self) -> String {
        match self.mode {
            Mode::Category(_) => "devnotes:category-form> ".to_string(),
            Mode::Note(_) => "devnotes:note-editor> ".to_string(),
            Mode::Browse => match self.app.active_category() {
                Some(category) => format!("devnotes:notes/{}> ", category.name),
                None => format!("devnotes:{}> ", self.app.view().active_view.name()),
            },
        }
    }

    /// Category by grid position (categories view) or by reference.
    fn category_arg(&self, rest: &str) -> Result<CategoryId> {
        if rest.is_empty() {
            bail!("expected a category number");
        }
        if self.app.view().active_view == ActiveView::Categories {
            if let Ok(position) = rest.parse::<usize>() {
                return position
                    .checked_sub(1)
                    .and_then(|index| self.app.visible_categories().get(index).map(|c| c.id))
                    .ok_or_else(|| anyhow!("no category at position {position}"));
            }
        }
        resolve_category(&self.app, rest).ok_or_else(|| anyhow!("category not found: {rest}"))
    }

    /// Note by grid position, or the note being viewed when `rest` is empty.
    fn note_arg(&self, rest: &str) -> Result<NoteId> {
        if rest.is_empty() {
            return self
                .app
                .active_note()
                .map(|note| note.id)
                .ok_or_else(|| anyhow!("expected a note number"));
        }
        let position: usize = rest
            .parse()
            .map_err(|_| anyhow!("expected a note number, got `{rest}`"))?;
        position
            .checked_sub(1)
            .and_then(|index| self.app.visible_notes().get(index).map(|note| note.id))
            .ok_or_else(|| anyhow!("no note at position {position}"))
    }

    fn delete_target(&self, rest: &str) -> Result<DeleteTarget> {
        if self.app.view().active_view == ActiveView::Categories && !rest.is_empty() {
            return Ok(DeleteTarget::Category(self.category_arg(rest)?));
        }
        Ok(DeleteTarget::Note(self.note_arg(rest)?))
    }
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}

const BROWSE_HELP: &str = "\
Navigation:
  home                      Categories grid
  open N                    Notes of category N
  favs                      Favorite notes
  settings                  Theme and zoom
  back                      Close the open note, or return home
  search TEXT               Filter the current grid (empty clears)
Categories:
  add-category              Open the category form
  edit-category [N]         Edit category N (or the open one)
Notes:
  new-note                  Open the editor for a new note
  edit-note [N]             Edit note N (or the viewed one)
  view N | pin N | fav N    View, pin or favorite note N
  delete [N]                Delete category/note N, then confirm or cancel
Settings:
  theme [light|dark|system] Set or toggle the theme
  zoom-in | zoom-out        Change text zoom (1-5)
  export [FILE]             Write devnotes-export.json
  clear                     Reset all data, then confirm or cancel
  quit
";

const CATEGORY_FORM_HELP: &str = "\
  name TEXT      Set the name
  icon NAME      Set the icon (see icons)
  color NAME     Set the color (see colors)
  show           Show the form
  save | cancel
";

const NOTE_EDITOR_HELP: &str = "\
  title TEXT                 Set the title
  pin                        Toggle pinned
  type TEXT                  Append a paragraph
  bold|italic|underline|highlight|code TEXT
                             Append formatted text
  bullets A; B | numbered A; B
                             Append a list
  undo | redo                Step through edit history
  show                       Show the draft
  save | cancel
";

#[cfg(test)]
mod tests {
    use super::{split_command, Flow, Shell};
    use devnotes_core::{
        ActiveView, App, ColorScheme, FixedColorScheme, ManualClock, MemoryKvRepository,
    };
    use std::rc::Rc;

    fn shell() -> (Shell<MemoryKvRepository>, ManualClock) {
        yansi::disable();
        let clock = ManualClock::starting_at(1_700_000_000_000);
        let app = App::open(
            MemoryKvRepository::new(),
            Rc::new(clock.clone()),
            Box::new(FixedColorScheme(ColorScheme::Light)),
        )
        .expect("app should open");
        (Shell::new(app), clock)
    }

    #[test]
    fn split_command_trims_arguments() {
        assert_eq!(split_command("search  grid "), ("search", "grid"));
        assert_eq!(split_command("home"), ("home", ""));
    }

    #[test]
    fn note_editing_round_trip() {
        let (mut shell, clock) = shell();
        for line in ["open 2", "new-note", "title Caching", "type ETag headers"] {
            assert_eq!(shell.handle_line(line).expect(line), Flow::Continue);
        }
        clock.advance(600);
        shell.handle_line("bold Cache-Control").expect("bold");
        shell.handle_line("undo").expect("undo");
        shell.handle_line("save").expect("save");

        let saved = shell
            .app
            .store()
            .notes()
            .iter()
            .find(|note| note.title == "Caching")
            .expect("note should be saved")
            .clone();
        assert_eq!(saved.content, "<p>ETag headers</p>");
        assert_eq!(saved.category_id, shell.app.store().categories()[1].id);
    }

    #[test]
    fn favoriting_follows_navigation_effect() {
        let (mut shell, _clock) = shell();
        shell.handle_line("open 3").expect("open");
        shell.handle_line("fav 1").expect("fav");
        assert_eq!(shell.app.view().active_view, ActiveView::Favorites);
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut shell, _clock) = shell();
        shell.handle_line("delete 1").expect("delete");
        assert_eq!(shell.app.store().categories().len(), 3);
        shell.handle_line("confirm").expect("confirm");
        assert_eq!(shell.app.store().categories().len(), 2);
    }

    #[test]
    fn only_the_latest_destructive_request_is_confirmed() {
        let (mut shell, _clock) = shell();
        for line in ["add-category", "name Mine", "icon code", "color red", "save"] {
            shell.handle_line(line).expect(line);
        }
        assert_eq!(shell.app.store().categories().len(), 4);

        shell.handle_line("clear").expect("clear");
        shell.handle_line("delete 1").expect("delete");
        shell.handle_line("confirm").expect("confirm");

        let names: Vec<&str> = shell
            .app
            .store()
            .categories()
            .iter()
            .map(|category| category.name.as_str())
            .collect();
        assert_eq!(names, ["Backend APIs", "Database", "Mine"]);

        shell.handle_line("delete 1").expect("delete");
        shell.handle_line("clear").expect("clear");
        shell.handle_line("confirm").expect("confirm");
        assert_eq!(shell.app.store().categories().len(), 3);
        assert!(shell.app.view().pending_delete.is_none());
    }

    #[test]
    fn unknown_command_is_an_error_and_quit_exits() {
        let (mut shell, _clock) = shell();
        assert!(shell.handle_line("frobnicate").is_err());
        assert_eq!(shell.handle_line("quit").expect("quit"), Flow::Exit);
    }
}
