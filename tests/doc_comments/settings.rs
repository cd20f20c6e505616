use crate::common::{editor_from_markup, render};
use docstub::syntax::LanguageRegistry;
use docstub::{CommandOutcome, DocCommentCommandHandler, Gesture, LanguageId, Settings};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn settings_from(toml: &str) -> Settings {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".docstub").join("settings.toml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, toml).unwrap();

    let settings = Settings::load_from(&path).unwrap();
    settings.validate().unwrap();
    settings
}

#[test]
fn test_disabled_auto_generation_keeps_default_typing() {
    let settings = settings_from(
        r#"
[doc_comments]
auto_generate = false
"#,
    );
    let registry = LanguageRegistry::with_builtin_languages();
    let handler =
        DocCommentCommandHandler::for_language(&registry, LanguageId::new("csharp"), &settings)
            .unwrap();

    let cancel = CancellationToken::new();
    let mut editor = editor_from_markup("//$$\nclass C { }", false);
    let outcome = handler.handle(&mut editor, Gesture::TypeChar('/'), &cancel);
    assert_eq!(outcome, CommandOutcome::NotHandled);
    assert_eq!(render(&editor), "///$$\nclass C { }");

    // Enter still goes through the transaction but generates nothing
    let outcome = handler.handle(&mut editor, Gesture::Enter, &cancel);
    assert_eq!(outcome, CommandOutcome::NotHandled);
    assert_eq!(render(&editor), "///\n$$\nclass C { }");

    // The explicit command is controlled separately
    let mut editor = editor_from_markup("class C { $$}", false);
    let outcome = handler.handle(&mut editor, Gesture::InsertComment, &cancel);
    assert_eq!(outcome, CommandOutcome::Handled);
}

#[test]
fn test_disabled_command() {
    let settings = settings_from(
        r#"
[doc_comments]
insert_on_command = false
"#,
    );
    let registry = LanguageRegistry::with_builtin_languages();
    let handler = DocCommentCommandHandler::for_extension(&registry, "cs", &settings).unwrap();

    let mut editor = editor_from_markup("class C { $$}", false);
    let outcome = handler.handle(&mut editor, Gesture::InsertComment, &CancellationToken::new());
    assert_eq!(outcome, CommandOutcome::NotHandled);
    assert_eq!(render(&editor), "class C { $$}");
}

#[test]
fn test_disabled_language_has_no_handler() {
    let settings = settings_from(
        r#"
[languages.csharp]
enabled = false
"#,
    );
    let registry = LanguageRegistry::with_builtin_languages();
    let err = DocCommentCommandHandler::for_extension(&registry, "cs", &settings)
        .err()
        .unwrap();
    assert_eq!(err.status_code(), "LANGUAGE_DISABLED");
}

#[test]
fn test_configured_extension_and_new_line() {
    let settings = settings_from(
        r#"
[formatting]
tab_size = 2
new_line = "\r\n"

[languages.csharp]
extensions = ["cake"]
"#,
    );
    assert_eq!(settings.formatting.tab_size, 2);

    let registry = LanguageRegistry::with_builtin_languages();
    let handler = DocCommentCommandHandler::for_extension(&registry, "cake", &settings).unwrap();

    let mut editor = docstub::MemoryEditor::new("class C { }", settings.formatting.clone());
    let outcome = handler.handle(&mut editor, Gesture::InsertComment, &CancellationToken::new());
    assert_eq!(outcome, CommandOutcome::Handled);
    assert_eq!(
        render(&editor),
        "/// <summary>\r\n/// $$\r\n/// </summary>\r\nclass C { }"
    );
}

#[test]
fn test_invalid_formatting_has_no_handler() {
    let mut settings = Settings::default();
    settings.formatting.new_line = Some("x".to_string());

    let registry = LanguageRegistry::with_builtin_languages();
    let err = DocCommentCommandHandler::for_extension(&registry, "cs", &settings)
        .err()
        .unwrap();
    assert_eq!(err.status_code(), "CONFIG_ERROR");
}
