use quest_script::{ParseError, parse_quest_source};

#[test]
fn unknown_directive() {
    let src = "title : Intro\nfoo : bar\n";
    let err = parse_quest_source(src).expect_err("foo is not a directive");
    assert_eq!(
        err,
        ParseError::UnknownDirective {
            directive: "foo".into(),
            offset: 14,
        }
    );
    assert_eq!(err.line_col(src), (2, 1));
}

#[test]
fn resource_id_must_be_a_number() {
    let src = "qrc :\nmessage : seven Hello\n";
    let err = parse_quest_source(src).expect_err("id is not a number");
    match err {
        ParseError::UnexpectedToken { expected, found, offset } => {
            assert_eq!(expected, "a number");
            assert_eq!(found, "identifier 'seven'");
            assert_eq!(offset, 16);
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn task_needs_scope_after_name() {
    let src = "qst :\nmessage 1\ntask second\nsound 2\n";
    let err = parse_quest_source(src).expect_err("missing ':' after task name");
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    assert_eq!(err.line_col(src), (4, 1));
}

#[test]
fn task_name_must_be_identifier() {
    let src = "qst :\ntask 12 :\nmessage 1\n";
    let err = parse_quest_source(src).expect_err("numeric task name");
    assert!(matches!(err, ParseError::UnexpectedToken { offset: 11, .. }));
}

#[test]
fn error_message_mentions_position() {
    let err = parse_quest_source("briefing hello").expect_err("missing scope");
    assert_eq!(
        err.to_string(),
        "expected ':' but found identifier 'hello' (byte 9)"
    );
}
