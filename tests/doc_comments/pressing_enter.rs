use crate::common::{verify_pressing_enter, verify_pressing_enter_with};
use docstub::CommandOutcome;

#[test]
fn test_enter_after_marker_above_class() {
    let code = "\
///$$
class C
{
}";
    let expected = "\
/// <summary>
/// $$
/// </summary>
class C
{
}";
    assert_eq!(verify_pressing_enter(code, expected), CommandOutcome::Handled);
}

#[test]
fn test_enter_between_marker_and_class() {
    let code = "\
///$$class C
{
}";
    let expected = "\
/// <summary>
/// $$
/// </summary>
class C
{
}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_between_marker_and_attribute() {
    let code = "\
///$$[Foo] class C
{
}";
    let expected = "\
/// <summary>
/// $$
/// </summary>
[Foo] class C
{
}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_after_marker_and_whitespace_only_continues() {
    let code = "///    $$class C\n{\n}";
    let expected = "///    \n/// $$class C\n{\n}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_after_marker_above_method() {
    let code = "\
class C
{
    ///$$
    int M<T>(int foo) { return 0; }
}";
    let expected = "\
class C
{
    /// <summary>
    /// $$
    /// </summary>
    /// <typeparam name=\"T\"></typeparam>
    /// <param name=\"foo\"></param>
    /// <returns></returns>
    int M<T>(int foo) { return 0; }
}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_between_marker_and_method() {
    let code = "\
class C
{
    ///$$int M<T>(int foo) { return 0; }
}";
    let expected = "\
class C
{
    /// <summary>
    /// $$
    /// </summary>
    /// <typeparam name=\"T\"></typeparam>
    /// <param name=\"foo\"></param>
    /// <returns></returns>
    int M<T>(int foo) { return 0; }
}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_not_in_method_body() {
    let code = "class C\n{\nvoid Foo()\n{\n///$$\n}\n}";
    let expected = "class C\n{\nvoid Foo()\n{\n///\n$$\n}\n}";
    assert_eq!(
        verify_pressing_enter(code, expected),
        CommandOutcome::NotHandled
    );
}

#[test]
fn test_enter_not_interleaved_in_class_name() {
    verify_pressing_enter("class///$$ C\n{\n}", "class///\n$$ C\n{\n}");
    verify_pressing_enter("class ///$$C\n{\n}", "class ///\n$$C\n{\n}");
    verify_pressing_enter("class /// $$C\n{\n}", "class /// \n$$C\n{\n}");
}

#[test]
fn test_enter_not_after_class_name() {
    verify_pressing_enter("class C ///$$\n{\n}", "class C ///\n$$\n{\n}");
    verify_pressing_enter("class C /** $$\n{\n}", "class C /** \n$$\n{\n}");
}

#[test]
fn test_enter_not_after_constructor_name() {
    let code = "class C\n{\nC() ///$$\n}";
    let expected = "class C\n{\nC() ///\n$$\n}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_not_inside_constructor() {
    let code = "class C\n{\nC()\n{\n///$$\n}\n}";
    let expected = "class C\n{\nC()\n{\n///\n$$\n}\n}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_not_before_doc_comment() {
    let code = "    class c1
    {
$$/// <summary>
        ///
        /// </summary>
        /// <returns></returns>
        public void foo()
        {
            var x = 1;
        }
    }";
    let expected = "    class c1
    {

$$/// <summary>
        ///
        /// </summary>
        /// <returns></returns>
        public void foo()
        {
            var x = 1;
        }
    }";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_on_bare_marker_above_comment_adds_marker() {
    let code = "\
///$$
/// <summary></summary>
class C
{
}";
    let expected = "\
///
/// $$
/// <summary></summary>
class C
{
}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_inside_summary_adds_marker() {
    let code = "/// <summary>\n/// $$\n/// </summary>\nclass C\n{\n}";
    let expected = "/// <summary>\n/// \n/// $$\n/// </summary>\nclass C\n{\n}";
    verify_pressing_enter(code, expected);

    let code = "    /// <summary>\n    /// $$\n    /// </summary>\n    class C\n    {\n    }";
    let expected =
        "    /// <summary>\n    /// \n    /// $$\n    /// </summary>\n    class C\n    {\n    }";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_between_tags_adds_marker() {
    let code = "\
/// <summary>$$</summary>
class C
{
}";
    let expected = "\
/// <summary>
/// $$</summary>
class C
{
}";
    verify_pressing_enter(code, expected);

    let code = "    /// <summary>$$</summary>\n    class C\n    {\n    }";
    let expected = "    /// <summary>\n    /// $$</summary>\n    class C\n    {\n    }";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_after_complete_comment_adds_marker() {
    let code = "\
/// <summary></summary>$$
class C
{
}";
    let expected = "\
/// <summary></summary>
/// $$
class C
{
}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_after_trailing_bare_marker_adds_marker() {
    let code = "/// <summary>\n/// \n/// </summary>\n///$$class C {}";
    let expected = "/// <summary>\n/// \n/// </summary>\n///\n/// $$class C {}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_on_bare_marker_above_documented_method() {
    let code = "\
class C
{
    ///$$
    /// <summary></summary>
    int M<T>(int foo) { return 0; }
}";
    let expected = "\
class C
{
    ///
    /// $$
    /// <summary></summary>
    int M<T>(int foo) { return 0; }
}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_before_plain_text_adds_marker() {
    let code = "/// <summary>\n/// \n/// </summary>\n///$$Go ahead and add some slashes";
    let expected =
        "/// <summary>\n/// \n/// </summary>\n///\n/// $$Go ahead and add some slashes";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_inside_param_tag_adds_marker() {
    let code = "\
class C
{
    /// <summary>
    ///
    /// </summary>
    /// <param name=\"i\">$$</param>
    void Foo(int i)
    {
    }
}";
    let expected = "\
class C
{
    /// <summary>
    ///
    /// </summary>
    /// <param name=\"i\">
    /// $$</param>
    void Foo(int i)
    {
    }
}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_preserves_params() {
    let code = "/// <summary>\n/// \n/// </summary>\n/// <param name=\"args\">$$</param>\nstatic void Main(string[] args)\n{ }";
    let expected = "/// <summary>\n/// \n/// </summary>\n/// <param name=\"args\">\n/// $$</param>\nstatic void Main(string[] args)\n{ }";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_on_last_bare_marker_ends_comment() {
    let code = "/// <summary></summary>\n/// $$\nclass C\n{\n}";
    let expected = "/// <summary></summary>\n/// \n$$\nclass C\n{\n}";
    assert_eq!(
        verify_pressing_enter(code, expected),
        CommandOutcome::NotHandled
    );
}

#[test]
fn test_enter_on_second_bare_marker_ends_comment() {
    let code = "///<summary></summary>\n\n///$$\nclass C{}";
    let expected = "///<summary></summary>\n\n///\n$$\nclass C{}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_in_text_before_space() {
    let code = "\
class C
{
    /// <summary>
    /// hello$$ world
    /// </summary>
    void M()
    {
    }
}";
    let expected = "\
class C
{
    /// <summary>
    /// hello
    /// $$world
    /// </summary>
    void M()
    {
    }
}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_keeps_content_indentation() {
    let code = "class C\n{\n    /// <summary>\n    ///     hello world$$\n    /// </summary>\n    void M()\n    {\n    }\n}";
    let expected = "class C\n{\n    /// <summary>\n    ///     hello world\n    ///     $$\n    /// </summary>\n    void M()\n    {\n    }\n}";
    verify_pressing_enter(code, expected);

    let code = "class C\n{\n    /// <summary>\n    ///     hello $$world\n    /// </summary>\n    void M()\n    {\n    }\n}";
    let expected = "class C\n{\n    /// <summary>\n    ///     hello \n    ///     $$world\n    /// </summary>\n    void M()\n    {\n    }\n}";
    verify_pressing_enter(code, expected);

    let code = "class C\n{\n    /// <summary>\n    ///     hello$$ world\n    /// </summary>\n    void M()\n    {\n    }\n}";
    let expected = "class C\n{\n    /// <summary>\n    ///     hello\n    ///     $$world\n    /// </summary>\n    void M()\n    {\n    }\n}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_before_content_resets_indentation() {
    let code = "class C\n{\n    /// <summary>\n    ///     $$hello world\n    /// </summary>\n    void M()\n    {\n    }\n}";
    let expected = "class C\n{\n    /// <summary>\n    ///     \n    /// $$hello world\n    /// </summary>\n    void M()\n    {\n    }\n}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_indents_with_tabs() {
    let code = "class C\n{\n    /// <summary>\n\t///     hello world$$\n    /// </summary>\n    void M()\n    {\n    }\n}";
    let expected = "class C\n{\n    /// <summary>\n\t///     hello world\n\t///     $$\n    /// </summary>\n    void M()\n    {\n    }\n}";
    verify_pressing_enter_with(code, expected, true);
}

#[test]
fn test_enter_replaces_selection() {
    let code = "/// <summary>\n/// Hello [|World|]$$!\n/// </summary>\nclass C\n{\n}";
    let expected = "/// <summary>\n/// Hello \n/// $$!\n/// </summary>\nclass C\n{\n}";
    verify_pressing_enter(code, expected);

    let code = "/// <summary>\n/// Hello $$[|World|]!\n/// </summary>\nclass C\n{\n}";
    verify_pressing_enter(code, expected);
}

#[test]
fn test_enter_with_crlf_buffer() {
    let code = "///$$\r\nclass C\r\n{\r\n}";
    let expected = "/// <summary>\r\n/// $$\r\n/// </summary>\r\nclass C\r\n{\r\n}";
    verify_pressing_enter(code, expected);
}
