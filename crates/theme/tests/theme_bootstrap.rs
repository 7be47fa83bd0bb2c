use std::fs;

use ircpalette_theme::{
    parse_lines, Color, Theme, ThemeConfig, ThemeContext, ThemeStore, MIRC_TEXT_COLORS,
};
use tempfile::tempdir;

#[test]
fn first_run_copies_system_themes_once() {
    let temp = tempdir().expect("tempdir");
    let system_a = temp.path().join("share-a/hexchat/themes");
    let system_b = temp.path().join("share-b/hexchat/themes");
    fs::create_dir_all(&system_a).expect("system dir a");
    fs::create_dir_all(&system_b).expect("system dir b");
    fs::write(system_a.join("solarized.theme"), "name=Solarized\n").expect("write");
    fs::write(system_a.join("README"), "not a theme").expect("write");
    fs::write(system_b.join("solarized.theme"), "name=Shadowed\n").expect("write");
    fs::write(system_b.join("monokai.theme"), "name=Monokai\n").expect("write");

    let config = ThemeConfig::new(temp.path().join("config/themes"))
        .with_system_dirs([system_a, system_b, temp.path().join("missing")]);
    let store = ThemeStore::new(config);

    let report = store.bootstrap_first_run();
    assert_eq!(report.installed, vec!["solarized.theme".to_string(), "monokai.theme".to_string()]);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);

    let mut available = store.list_available();
    available.sort();
    assert_eq!(available, vec!["monokai.theme", "solarized.theme"]);
    let copied = fs::read_to_string(store.theme_dir().join("solarized.theme")).expect("read");
    assert_eq!(copied, "name=Solarized\n");

    let second = store.bootstrap_first_run();
    assert!(second.installed.is_empty());
    assert_eq!(second.skipped, 0);
}

#[test]
fn existing_user_themes_suppress_bootstrap() {
    let temp = tempdir().expect("tempdir");
    let system = temp.path().join("share/hexchat/themes");
    fs::create_dir_all(&system).expect("system dir");
    fs::write(system.join("mine.theme"), "name=System\n").expect("write");

    let store = ThemeStore::new(
        ThemeConfig::new(temp.path().join("themes")).with_system_dirs([system]),
    );
    store.ensure_theme_dir().expect("theme dir");
    fs::write(store.theme_dir().join("mine.theme"), "name=Mine\n").expect("write");

    let report = store.bootstrap_first_run();
    assert!(report.installed.is_empty());
    let kept = fs::read_to_string(store.theme_dir().join("mine.theme")).expect("read");
    assert_eq!(kept, "name=Mine\n");
}

#[test]
fn init_creates_directory_and_returns_base_context() {
    let temp = tempdir().expect("tempdir");
    let store = ThemeStore::new(ThemeConfig::new(temp.path().join("nested/themes")));
    let (context, report) = store.init();
    assert!(store.theme_dir().is_dir());
    assert!(report.installed.is_empty());
    assert_eq!(context.current_theme(), ThemeContext::new().current_theme());
}

#[test]
fn list_available_filters_by_suffix() {
    let temp = tempdir().expect("tempdir");
    let store = ThemeStore::new(ThemeConfig::new(temp.path().join("themes")));
    assert!(store.list_available().is_empty());

    store.ensure_theme_dir().expect("theme dir");
    fs::write(store.theme_dir().join("a.theme"), "").expect("write");
    fs::write(store.theme_dir().join("a.theme.bak"), "").expect("write");
    fs::write(store.theme_dir().join("notes.txt"), "").expect("write");
    assert_eq!(store.list_available(), vec!["a.theme"]);
}

#[test]
fn backfill_adds_mirc_colors_only_where_missing() {
    let temp = tempdir().expect("tempdir");
    let store = ThemeStore::new(ThemeConfig::new(temp.path().join("themes")));
    store.ensure_theme_dir().expect("theme dir");
    fs::write(store.theme_dir().join("old.theme"), "name=Old\nbg_color=#000000").expect("write");
    fs::write(
        store.theme_dir().join("new.theme"),
        "name=New\ntext_color_0=#123456\n",
    )
    .expect("write");

    let report = store.backfill_text_colors();
    assert_eq!(report.updated, vec!["old.theme".to_string()]);
    assert_eq!(report.untouched, 1);
    assert_eq!(report.failed, 0);

    let untouched = fs::read_to_string(store.theme_dir().join("new.theme")).expect("read");
    assert_eq!(untouched, "name=New\ntext_color_0=#123456\n");

    let updated = fs::read_to_string(store.theme_dir().join("old.theme")).expect("read");
    assert!(updated.starts_with("name=Old\nbg_color=#000000\ntext_color_0=#FFFFFF\n"));
    let mut theme = Theme::light_default();
    let parsed = parse_lines(&mut theme, updated.lines());
    assert_eq!(parsed.applied, 2 + MIRC_TEXT_COLORS.len());
    assert_eq!(theme.text_colors[4], Color::rgb8(0xff, 0, 0));

    let again = store.backfill_text_colors();
    assert!(again.updated.is_empty());
    assert_eq!(again.untouched, 2);
}

#[test]
fn bootstrap_counts_unreadable_entries_and_keeps_going() {
    let temp = tempdir().expect("tempdir");
    let system = temp.path().join("share/hexchat/themes");
    fs::create_dir_all(system.join("dir.theme")).expect("directory posing as theme");
    fs::write(system.join("ok.theme"), "name=Ok\n").expect("write");

    let store = ThemeStore::new(
        ThemeConfig::new(temp.path().join("themes")).with_system_dirs([system]),
    );
    let report = store.bootstrap_first_run();
    assert_eq!(report.installed, vec!["ok.theme".to_string()]);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 0);
    assert!(store.theme_dir().join("ok.theme").is_file());
    assert!(!store.theme_dir().join("dir.theme").exists());
}

#[test]
fn backfill_counts_unreadable_entries_and_keeps_going() {
    let temp = tempdir().expect("tempdir");
    let store = ThemeStore::new(ThemeConfig::new(temp.path().join("themes")));
    store.ensure_theme_dir().expect("theme dir");
    fs::create_dir_all(store.theme_dir().join("dir.theme")).expect("directory posing as theme");
    fs::write(store.theme_dir().join("plain.theme"), "name=Plain\n").expect("write");

    let report = store.backfill_text_colors();
    assert_eq!(report.updated, vec!["plain.theme".to_string()]);
    assert_eq!(report.failed, 1);
    assert_eq!(report.untouched, 0);
    let updated = fs::read_to_string(store.theme_dir().join("plain.theme")).expect("read");
    assert!(updated.contains("text_color_31=#FFFFFF"));
}
