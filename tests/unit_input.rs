use cmdpal::domain::input::ParsedInput;

#[test]
fn splits_search_term_and_arguments() {
    let parsed = ParsedInput::parse("foo;bar;baz");
    assert_eq!(parsed.search_term, "foo");
    assert_eq!(
        parsed.arguments,
        Some(vec!["bar".to_string(), "baz".to_string()])
    );
}

#[test]
fn plain_input_has_no_arguments() {
    let parsed = ParsedInput::parse("foo");
    assert_eq!(parsed.search_term, "foo");
    assert_eq!(parsed.arguments, None);
    assert!(!parsed.has_arguments());
}

#[test]
fn leading_separators_leave_empty_search_term() {
    let parsed = ParsedInput::parse(";;foo");
    assert_eq!(parsed.search_term, "");
    assert_eq!(parsed.arguments, Some(vec!["foo".to_string()]));
}

#[test]
fn empty_argument_segments_are_dropped() {
    let parsed = ParsedInput::parse("rename;;Boss;");
    assert_eq!(parsed.search_term, "rename");
    assert_eq!(parsed.arguments, Some(vec!["Boss".to_string()]));
}

#[test]
fn trailing_separator_yields_empty_argument_list() {
    let parsed = ParsedInput::parse("create;");
    assert_eq!(parsed.search_term, "create");
    assert_eq!(parsed.arguments, Some(Vec::new()));
}

#[test]
fn empty_input_parses_to_default() {
    assert_eq!(ParsedInput::parse(""), ParsedInput::default());
}

#[test]
fn arguments_are_passed_verbatim() {
    let parsed = ParsedInput::parse("create; Enemy Boss ");
    assert_eq!(parsed.arguments, Some(vec![" Enemy Boss ".to_string()]));
}
