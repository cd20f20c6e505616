use crate::common::{verify_open_line_above, verify_open_line_below};
use docstub::CommandOutcome;

const SUMMARY_WITH_STUFF: &str = "class C
{
    /// <summary>
    /// stuff
    /// </summary>
    void M()
    {
    }
}";

#[test]
fn test_open_line_above_from_end_of_text() {
    let code = SUMMARY_WITH_STUFF.replace("/// stuff", "/// stuff$$");
    let expected = SUMMARY_WITH_STUFF.replace("/// stuff", "/// $$\n    /// stuff");
    assert_eq!(
        verify_open_line_above(&code, &expected, false),
        CommandOutcome::Handled
    );
}

#[test]
fn test_open_line_above_from_start_of_text() {
    let code = SUMMARY_WITH_STUFF.replace("/// stuff", "/// $$stuff");
    let expected = SUMMARY_WITH_STUFF.replace("/// stuff", "/// $$\n    /// stuff");
    verify_open_line_above(&code, &expected, false);
}

#[test]
fn test_open_line_above_first_comment_line() {
    let code = SUMMARY_WITH_STUFF.replace("/// <summary>", "/// $$<summary>");
    let expected = SUMMARY_WITH_STUFF.replace("{\n    /// <summary>", "{\n$$\n    /// <summary>");
    assert_eq!(
        verify_open_line_above(&code, &expected, false),
        CommandOutcome::NotHandled
    );
}

#[test]
fn test_open_line_above_with_tabs() {
    let code = "class C\n{\n\t\t  /// <summary>\n    /// $$stuff\n    /// </summary>\n    void M()\n    {\n    }\n}";
    let expected = "class C\n{\n\t\t  /// <summary>\n\t\t  /// $$\n    /// stuff\n    /// </summary>\n    void M()\n    {\n    }\n}";
    verify_open_line_above(code, expected, true);
}

#[test]
fn test_open_line_below_from_end_of_text() {
    let code = SUMMARY_WITH_STUFF.replace("/// stuff", "/// stuff$$");
    let expected = SUMMARY_WITH_STUFF.replace("/// stuff", "/// stuff\n    /// $$");
    verify_open_line_below(&code, &expected, false);
}

#[test]
fn test_open_line_below_from_start_of_text() {
    let code = SUMMARY_WITH_STUFF.replace("/// stuff", "/// $$stuff");
    let expected = SUMMARY_WITH_STUFF.replace("/// stuff", "/// stuff\n    /// $$");
    verify_open_line_below(&code, &expected, false);
}

#[test]
fn test_open_line_below_last_comment_line() {
    let code = "/// <summary>\n/// stuff\n/// $$</summary>\n";
    let expected = "/// <summary>\n/// stuff\n/// </summary>\n/// $$\n";
    verify_open_line_below(code, expected, false);
}

#[test]
fn test_open_line_below_with_tabs() {
    let code = "class C\n{\n    /// <summary>\n\t\t  /// $$stuff\n    /// </summary>\n    void M()\n    {\n    }\n}";
    let expected = "class C\n{\n    /// <summary>\n\t\t  /// stuff\n\t\t  /// $$\n    /// </summary>\n    void M()\n    {\n    }\n}";
    verify_open_line_below(code, expected, true);
}

#[test]
fn test_open_line_outside_comment_is_default() {
    let code = "class C\n{\n    int x;$$\n}";
    let expected = "class C\n{\n    int x;\n$$\n}";
    assert_eq!(
        verify_open_line_below(code, expected, false),
        CommandOutcome::NotHandled
    );
}
