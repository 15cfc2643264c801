use devnotes_core::app::{CategoryForm, NoteForm, FAVORITES_NAVIGATION_DELAY_MS};
use devnotes_core::{
    ActiveView, App, CategoryColor, CategoryIcon, ColorScheme, DeleteTarget, FixedColorScheme,
    ManualClock, MemoryKvRepository, TextZoom, Theme, UiEffect,
};
use std::rc::Rc;

const T0: i64 = 1_700_000_000_000;

fn open_app(kv: &MemoryKvRepository, clock: &ManualClock) -> App<MemoryKvRepository> {
    App::open(
        kv.clone(),
        Rc::new(clock.clone()),
        Box::new(FixedColorScheme(ColorScheme::Dark)),
    )
    .unwrap()
}

fn fresh() -> (App<MemoryKvRepository>, ManualClock) {
    let clock = ManualClock::starting_at(T0);
    (open_app(&MemoryKvRepository::new(), &clock), clock)
}

fn toast(text: &str) -> UiEffect {
    UiEffect::Toast(text.to_string())
}

#[test]
fn first_run_shows_sample_categories_with_default_preferences() {
    let (app, _clock) = fresh();

    assert_eq!(app.view().active_view, ActiveView::Categories);
    assert_eq!(app.visible_categories().len(), 3);
    assert_eq!(app.theme(), Theme::System);
    assert_eq!(app.resolved_scheme(), ColorScheme::Dark);
    assert_eq!(app.text_zoom(), TextZoom::DEFAULT);
    assert!(app.visible_notes().is_empty());
}

#[test]
fn navigation_resets_search_and_rejects_unknown_categories() {
    let (mut app, _clock) = fresh();
    let frontend = app.store().categories()[0].id;

    app.set_search("front");
    assert_eq!(app.visible_categories().len(), 1);

    assert!(app.navigate(ActiveView::Notes(frontend)));
    assert!(app.view().search_query.is_empty());
    assert_eq!(app.active_category().unwrap().name, "Frontend Development");
    assert_eq!(app.visible_notes().len(), 1);

    app.set_search("nothing matches this");
    assert!(app.visible_notes().is_empty());

    assert!(!app.navigate(ActiveView::Notes(uuid::Uuid::new_v4())));
    assert_eq!(app.view().active_view, ActiveView::Notes(frontend));

    app.navigate(ActiveView::Categories);
    assert!(app.view().active_category().is_none());
}

#[test]
fn category_form_validation_is_silent_and_keeps_form_open() {
    let (mut app, _clock) = fresh();
    let form = app.open_category_form(None).unwrap();
    assert_eq!(form.icon, Some(CategoryIcon::Terminal));
    assert_eq!(form.color, Some(CategoryColor::Green));

    let blank = CategoryForm {
        name: "   ".to_string(),
        ..form.clone()
    };
    assert!(!app.submit_category_form(&blank).unwrap());
    let no_icon = CategoryForm {
        name: "Rust".to_string(),
        icon: None,
        ..form.clone()
    };
    assert!(!app.submit_category_form(&no_icon).unwrap());
    assert!(app.view().open_form.is_some());
    assert!(app.drain_effects().is_empty());
    assert_eq!(app.store().categories().len(), 3);

    let valid = CategoryForm {
        name: "Rust".to_string(),
        ..form
    };
    assert!(app.submit_category_form(&valid).unwrap());
    assert!(app.view().open_form.is_none());
    assert_eq!(
        app.drain_effects(),
        [toast("Category created successfully")]
    );
    assert_eq!(app.store().categories().len(), 4);
}

#[test]
fn editing_category_prefills_and_updates() {
    let (mut app, _clock) = fresh();
    let id = app.store().categories()[2].id;

    let mut form = app.open_category_form(Some(id)).unwrap();
    assert_eq!(form.name, "Database");
    assert_eq!(form.color, Some(CategoryColor::Purple));
    form.name = "Databases".to_string();

    assert!(app.submit_category_form(&form).unwrap());
    assert_eq!(app.store().category(id).unwrap().name, "Databases");
    assert_eq!(
        app.drain_effects(),
        [toast("Category updated successfully")]
    );
}

#[test]
fn new_note_requires_active_category_and_saves_editor_content() {
    let (mut app, clock) = fresh();
    assert!(app.open_note_form(None).is_none());

    let backend = app.store().categories()[1].id;
    app.navigate(ActiveView::Notes(backend));
    let mut form = app.open_note_form(None).unwrap();
    assert!(app.editor().unwrap().history().is_empty());

    app.editor_input("<p>Status codes</p>");
    clock.advance(200);
    assert!(!app.editor_tick());

    form.title = "HTTP".to_string();
    form.is_pinned = true;
    assert!(app.submit_note_form(&form).unwrap());
    assert!(app.editor().is_none());
    assert_eq!(app.drain_effects(), [toast("Note saved successfully")]);

    let listed = app.visible_notes();
    assert_eq!(listed[0].title, "HTTP");
    assert_eq!(listed[0].content, "<p>Status codes</p>");
    assert!(listed[0].is_pinned);
    assert!(!listed[0].is_favorite);
}

#[test]
fn blank_note_title_keeps_form_open_without_notification() {
    let (mut app, _clock) = fresh();
    let backend = app.store().categories()[1].id;
    app.navigate(ActiveView::Notes(backend));
    app.open_note_form(None).unwrap();

    let before = app.store().notes().len();
    assert!(!app.submit_note_form(&NoteForm::default()).unwrap());
    assert_eq!(app.store().notes().len(), before);
    assert!(app.editor().is_some());
    assert!(app.drain_effects().is_empty());
}

#[test]
fn editing_note_keeps_favorite_flag_and_supports_undo() {
    let (mut app, clock) = fresh();
    let rest = app.store().notes()[1].clone();
    assert!(rest.is_favorite);

    let mut form = app.open_note_form(Some(rest.id)).unwrap();
    assert_eq!(form.title, "REST API Best Practices");
    assert_eq!(app.editor().unwrap().history().len(), 1);

    app.editor_format("<p><b>bold</b></p>");
    assert_eq!(app.editor_undo().as_deref(), Some(rest.content.as_str()));
    assert_eq!(app.editor_redo().as_deref(), Some("<p><b>bold</b></p>"));

    app.editor_input("<p><b>bold</b> text</p>");
    clock.advance(500);
    assert!(app.editor_tick());

    form.title = "REST".to_string();
    assert!(app.submit_note_form(&form).unwrap());
    let saved = app.store().note(rest.id).unwrap();
    assert_eq!(saved.title, "REST");
    assert_eq!(saved.content, "<p><b>bold</b> text</p>");
    assert!(saved.is_favorite);
    assert_eq!(saved.category_id, rest.category_id);
    assert_eq!(app.drain_effects(), [toast("Note updated successfully")]);
}

#[test]
fn favoriting_schedules_navigation_and_unfavoriting_in_favorites_refreshes() {
    let (mut app, _clock) = fresh();
    let sql = app.store().notes()[2].id;

    app.toggle_favorite(sql).unwrap().unwrap();
    assert_eq!(
        app.drain_effects(),
        [
            toast("Note added to favorites"),
            UiEffect::Navigate {
                view: ActiveView::Favorites,
                after_ms: FAVORITES_NAVIGATION_DELAY_MS,
            },
        ]
    );

    app.navigate(ActiveView::Favorites);
    assert_eq!(app.visible_notes().len(), 2);
    app.toggle_favorite(sql).unwrap().unwrap();
    assert_eq!(
        app.drain_effects(),
        [
            toast("Note removed from favorites"),
            UiEffect::Refresh { after_ms: 100 },
        ]
    );
    assert_eq!(app.visible_notes().len(), 1);
}

#[test]
fn pin_toggle_reorders_without_notification() {
    let (mut app, clock) = fresh();
    let frontend = app.store().categories()[0].id;
    app.navigate(ActiveView::Notes(frontend));
    let grid = app.store().notes()[0].id;

    clock.advance(1);
    let unpinned = app.toggle_pin(grid).unwrap().unwrap();
    assert!(!unpinned.is_pinned);
    assert!(app.drain_effects().is_empty());
}

#[test]
fn deleting_active_category_returns_to_categories() {
    let (mut app, _clock) = fresh();
    let frontend = app.store().categories()[0].id;
    let grid = app.store().notes()[0].id;
    app.navigate(ActiveView::Notes(frontend));
    app.view_note(grid).unwrap();

    let warning = app.request_delete(DeleteTarget::Category(frontend)).unwrap();
    assert!(warning.contains("All notes in this category will also be deleted"));
    assert!(app.confirm_delete().unwrap());

    assert_eq!(app.view().active_view, ActiveView::Categories);
    assert!(app.active_note().is_none());
    assert!(app.store().note(grid).is_none());
    assert_eq!(
        app.drain_effects(),
        [toast("Category deleted successfully")]
    );
}

#[test]
fn cancelled_delete_changes_nothing() {
    let (mut app, _clock) = fresh();
    let sql = app.store().notes()[2].id;

    let warning = app.request_delete(DeleteTarget::Note(sql)).unwrap();
    assert!(warning.contains("delete this note"));
    app.cancel_delete();
    assert!(!app.confirm_delete().unwrap());
    assert!(app.store().note(sql).is_some());
    assert!(app.request_delete(DeleteTarget::Note(uuid::Uuid::new_v4())).is_none());
}

#[test]
fn deleting_viewed_note_closes_it() {
    let (mut app, _clock) = fresh();
    let sql = app.store().notes()[2].id;
    app.view_note(sql).unwrap();

    app.request_delete(DeleteTarget::Note(sql)).unwrap();
    assert!(app.confirm_delete().unwrap());
    assert!(app.active_note().is_none());
    assert_eq!(app.drain_effects(), [toast("Note deleted successfully")]);
}

#[test]
fn zoom_clamps_at_bounds_and_persists() {
    let kv = MemoryKvRepository::new();
    let clock = ManualClock::starting_at(T0);
    let mut app = open_app(&kv, &clock);

    for _ in 0..3 {
        app.zoom_in().unwrap().unwrap();
    }
    assert_eq!(app.text_zoom().level(), 5);
    assert!(app.zoom_in().unwrap().is_none());
    assert_eq!(
        app.drain_effects(),
        [
            toast("Text zoom: 3 of 5"),
            toast("Text zoom: 4 of 5"),
            toast("Text zoom: 5 of 5"),
        ]
    );
    drop(app);

    let mut reopened = open_app(&kv, &clock);
    assert_eq!(reopened.text_zoom().css_class(), "zoom-level-5");
    for _ in 0..4 {
        reopened.zoom_out().unwrap().unwrap();
    }
    assert!(reopened.zoom_out().unwrap().is_none());
    assert_eq!(reopened.text_zoom().level(), 1);
}

#[test]
fn theme_toggle_follows_resolved_scheme_and_persists() {
    let kv = MemoryKvRepository::new();
    let clock = ManualClock::starting_at(T0);
    let mut app = open_app(&kv, &clock);

    assert_eq!(app.toggle_theme().unwrap(), Theme::Light);
    assert_eq!(app.resolved_scheme(), ColorScheme::Light);
    drop(app);

    let mut reopened = open_app(&kv, &clock);
    assert_eq!(reopened.theme(), Theme::Light);
    assert_eq!(reopened.toggle_theme().unwrap(), Theme::Dark);
    reopened.set_theme(Theme::System).unwrap();
    assert_eq!(reopened.resolved_scheme(), ColorScheme::Dark);
}

#[test]
fn clear_all_requires_confirmation_then_reseeds() {
    let (mut app, _clock) = fresh();
    let frontend = app.store().categories()[0].id;
    app.navigate(ActiveView::Notes(frontend));

    assert!(!app.clear_all(false).unwrap());
    assert!(app.store().category(frontend).is_some());

    assert!(app.clear_all(true).unwrap());
    assert_eq!(app.view().active_view, ActiveView::Categories);
    assert_eq!(app.store().categories().len(), 3);
    assert!(app.store().category(frontend).is_none());
    assert_eq!(
        app.drain_effects(),
        [toast("All data cleared and reset to default")]
    );
}

#[test]
fn export_produces_json_and_notifies() {
    let (mut app, _clock) = fresh();

    let json = app.export_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["notes"].as_array().unwrap().len(), 3);
    assert_eq!(app.drain_effects(), [toast("Data exported successfully")]);
}
