use devnotes_core::app::CategoryForm;
use devnotes_core::repo::state_repo::{CATEGORIES_KEY, TEXT_ZOOM_KEY, THEME_KEY};
use devnotes_core::{
    open_db, App, CategoryColor, CategoryIcon, ColorScheme, FixedColorScheme, KvRepository,
    ManualClock, SqliteKvRepository, Theme,
};
use std::path::Path;
use std::rc::Rc;

fn with_app<T>(path: &Path, run: impl FnOnce(&mut App<SqliteKvRepository<'_>>) -> T) -> T {
    let conn = open_db(path).unwrap();
    let kv = SqliteKvRepository::try_new(&conn).unwrap();
    let mut app = App::open(
        kv,
        Rc::new(ManualClock::starting_at(1_700_000_000_000)),
        Box::new(FixedColorScheme(ColorScheme::Light)),
    )
    .unwrap();
    run(&mut app)
}

#[test]
fn state_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("devnotes.sqlite3");

    let created = with_app(&path, |app| {
        app.open_category_form(None).unwrap();
        app.submit_category_form(&CategoryForm {
            name: "Ops".to_string(),
            icon: Some(CategoryIcon::Cloud),
            color: Some(CategoryColor::Teal),
        })
        .unwrap();
        app.set_theme(Theme::Dark).unwrap();
        app.zoom_out().unwrap();
        app.store().categories().last().unwrap().id
    });

    with_app(&path, |app| {
        let ops = app.store().category(created).unwrap();
        assert_eq!(ops.name, "Ops");
        assert_eq!(ops.color, CategoryColor::Teal);
        assert_eq!(app.store().categories().len(), 4);
        assert_eq!(app.theme(), Theme::Dark);
        assert_eq!(app.text_zoom().level(), 1);
    });
}

#[test]
fn stored_values_use_documented_literals() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("devnotes.sqlite3");

    with_app(&path, |app| {
        app.set_theme(Theme::System).unwrap();
        app.zoom_in().unwrap();
    });

    let conn = open_db(&path).unwrap();
    let kv = SqliteKvRepository::try_new(&conn).unwrap();
    assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("system"));
    assert_eq!(kv.get(TEXT_ZOOM_KEY).unwrap().as_deref(), Some("3"));
    let categories = kv.get(CATEGORIES_KEY).unwrap().unwrap();
    assert!(categories.starts_with('['));
    assert!(categories.contains("\"createdAt\""));
    assert!(categories.contains("ri-server-line"));
}
