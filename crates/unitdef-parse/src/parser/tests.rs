use super::*;
use crate::ErrorClass;
use std::borrow::Cow;

fn parse(source: &str) -> Vec<Event<'_>> {
    Parser::new(source).parse_to_vec()
}

fn error_of(source: &str) -> (Span, ParseErrorKind) {
    match parse(source).pop() {
        Some(Event::Error { span, kind }) => (span, kind),
        other => panic!("expected an error event, got {other:?}"),
    }
}

fn tokens<'a>(events: &'a [Event<'_>]) -> Vec<&'a str> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Token { text, .. } | Event::Quoted { text, .. } => Some(text.as_ref()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_empty_document() {
    assert_eq!(parse(""), vec![Event::DocumentStart, Event::DocumentEnd]);
    assert_eq!(
        parse("  \n\t"),
        vec![Event::DocumentStart, Event::DocumentEnd]
    );
}

#[test]
fn test_single_unit() {
    let events = parse("unit=A,,,;{ty=g;}");
    assert_eq!(
        events,
        vec![
            Event::DocumentStart,
            Event::UnitStart {
                span: Span::new(0, 10),
                name: "A",
                permission_mode: "",
                jp1_user: "",
                resource_group: "",
            },
            Event::ParameterStart {
                span: Span::new(11, 13),
                name: "ty",
            },
            Event::Token {
                span: Span::new(14, 15),
                text: Cow::Borrowed("g"),
            },
            Event::ParameterEnd {
                span: Span::new(11, 16),
            },
            Event::UnitEnd {
                span: Span::new(16, 17),
            },
            Event::DocumentEnd,
        ]
    );
}

#[test]
fn test_attribute_arity() {
    for (source, expected) in [
        ("unit=A;{ty=g;}", ["A", "", "", ""]),
        ("unit=A,0755;{ty=g;}", ["A", "0755", "", ""]),
        ("unit=A,,adm;{ty=g;}", ["A", "", "adm", ""]),
        ("unit=A,,adm,grp;{ty=g;}", ["A", "", "adm", "grp"]),
    ] {
        let events = parse(source);
        let header = events.iter().find_map(|e| match e {
            Event::UnitStart {
                name,
                permission_mode,
                jp1_user,
                resource_group,
                ..
            } => Some([*name, *permission_mode, *jp1_user, *resource_group]),
            _ => None,
        });
        assert_eq!(header, Some(expected), "{source}");
        assert_eq!(events.last(), Some(&Event::DocumentEnd), "{source}");
    }
}

#[test]
fn test_keyword_accepts_whitespace_separator() {
    let events = parse("unit A,,,;\n{\n\tty=g;\n}\n");
    assert!(events.iter().any(|e| matches!(e, Event::UnitStart { name: "A", .. })));
    assert_eq!(events.last(), Some(&Event::DocumentEnd));
}

#[test]
fn test_more_than_four_attributes_is_rejected() {
    let (_, kind) = error_of("unit=A,,,,;{ty=g;}");
    assert_eq!(
        kind,
        ParseErrorKind::ExpectedChar {
            expected: ';',
            found: ','
        }
    );
}

#[test]
fn test_empty_unit_name() {
    let (span, kind) = error_of("unit=,,,;{ty=g;}");
    assert_eq!(kind, ParseErrorKind::EmptyUnitName);
    assert_eq!(span, Span::new(5, 5));
}

#[test]
fn test_empty_body_is_rejected() {
    let (span, kind) = error_of("unit=A,,,;{}");
    assert_eq!(kind, ParseErrorKind::EmptyUnitBody);
    assert_eq!(span, Span::new(10, 12));

    let (_, kind) = error_of("unit=A,,,;{ \n }");
    assert_eq!(kind, ParseErrorKind::EmptyUnitBody);
}

#[test]
fn test_missing_keyword() {
    let (span, kind) = error_of("  units=A;{ty=g;}");
    assert_eq!(kind, ParseErrorKind::ExpectedKeyword);
    assert_eq!(span, Span::new(2, 3));
    assert_eq!(kind.class(), ErrorClass::Syntax);
}

#[test]
fn test_nested_units() {
    let source = "unit=NET,,,;{ty=n;unit=J1,,,;{ty=j;}unit=J2,,,;{ty=j;}}";
    let events = parse(source);
    let names: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            Event::UnitStart { name, .. } => Some(*name),
            _ => None,
        })
        .collect();
    assert_eq!(names, ["NET", "J1", "J2"]);
    let ends = events
        .iter()
        .filter(|e| matches!(e, Event::UnitEnd { .. }))
        .count();
    assert_eq!(ends, 3);
    assert_eq!(events.last(), Some(&Event::DocumentEnd));
}

#[test]
fn test_body_of_only_sub_units() {
    let events = parse("unit=NET,,,;{unit=J1,,,;{ty=j;}}");
    assert_eq!(events.last(), Some(&Event::DocumentEnd));
    assert!(!events.iter().any(|e| matches!(e, Event::ParameterStart { .. })));
}

#[test]
fn test_parameter_after_sub_unit() {
    let (_, kind) = error_of("unit=NET,,,;{unit=J1,,,;{ty=j;}ty=n;}");
    assert_eq!(kind, ParseErrorKind::ParameterAfterSubUnit);
    assert_eq!(kind.class(), ErrorClass::Syntax);
}

#[test]
fn test_multiple_top_level_units() {
    let events = parse("unit=A,,,;{ty=g;}\nunit=B,,,;{ty=g;}\n");
    let count = events
        .iter()
        .filter(|e| matches!(e, Event::UnitStart { .. }))
        .count();
    assert_eq!(count, 2);
}

#[test]
fn test_multiple_values() {
    let events = parse("unit=A,,,;{el=JOB1,j,+240 +96;}");
    assert_eq!(tokens(&events), ["JOB1", "j", "+240 +96"]);
}

#[test]
fn test_quoted_value_is_unescaped() {
    let events = parse(r##"unit=A,,,;{sc="say #"hi#" ##1";}"##);
    assert_eq!(tokens(&events), [r#"say "hi" #1"#]);
    assert!(events.iter().any(|e| matches!(e, Event::Quoted { .. })));
}

#[test]
fn test_quoted_value_may_contain_delimiters() {
    let events = parse(r#"unit=A,,,;{cm="a,b;c}";}"#);
    assert_eq!(tokens(&events), ["a,b;c}"]);
}

#[test]
fn test_token_keeps_quoted_runs_escaped() {
    let events = parse(r#"unit=A,,,;{prm=-x "a b" -y;}"#);
    assert_eq!(tokens(&events), [r#"-x "a b" -y"#]);

    let events = parse(r##"unit=A,,,;{prm=-x "#x,y";}"##);
    assert_eq!(tokens(&events), [r###"-x "##x,y""###]);
    assert!(events.iter().any(|e| matches!(e, Event::Token { .. })));
}

#[test]
fn test_tuple_entries() {
    let events = parse("unit=A,,,;{ar=(f=J1,t=J2,con);}");
    let entries: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            Event::TupleEntry { key, value, .. } => Some((*key, *value)),
            _ => None,
        })
        .collect();
    assert_eq!(
        entries,
        [(Some("f"), "J1"), (Some("t"), "J2"), (None, "con")]
    );
}

#[test]
fn test_tuple_first_equals_splits() {
    let events = parse("unit=A,,,;{x=(k=a=b);}");
    assert!(events.iter().any(|e| matches!(
        e,
        Event::TupleEntry {
            key: Some("k"),
            value: "a=b",
            ..
        }
    )));
}

#[test]
fn test_empty_tuple_and_trailing_comma() {
    let events = parse("unit=A,,,;{x=();}");
    assert!(!events.iter().any(|e| matches!(e, Event::TupleEntry { .. })));
    assert!(events.iter().any(|e| matches!(e, Event::TupleEnd { .. })));

    let events = parse("unit=A,,,;{x=(a,);}");
    let values: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            Event::TupleEntry { value, .. } => Some(*value),
            _ => None,
        })
        .collect();
    assert_eq!(values, ["a", ""]);
}

#[test]
fn test_ar_parameters_keep_order() {
    let events = parse("unit=N,,,;{ar=(f=A,t=B);ar=(f=B,t=C);}");
    let entries: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            Event::TupleEntry { key, value, .. } => Some((*key, *value)),
            _ => None,
        })
        .collect();
    assert_eq!(
        entries,
        [
            (Some("f"), "A"),
            (Some("t"), "B"),
            (Some("f"), "B"),
            (Some("t"), "C")
        ]
    );
}

#[test]
fn test_unterminated_quoted() {
    let (span, kind) = error_of(r#"unit=A,,,;{sc="abc"#);
    assert_eq!(kind, ParseErrorKind::UnterminatedQuoted);
    assert_eq!(span, Span::new(14, 18));
    assert_eq!(kind.class(), ErrorClass::Value);
}

#[test]
fn test_unterminated_tuple() {
    let (_, kind) = error_of("unit=A,,,;{ar=(f=A,t=B");
    assert_eq!(kind, ParseErrorKind::UnterminatedTuple);
    assert_eq!(kind.class(), ErrorClass::Value);
}

#[test]
fn test_malformed_value_end() {
    let (span, kind) = error_of(r#"unit=A,,,;{sc="a"b;}"#);
    assert_eq!(kind, ParseErrorKind::MalformedValueEnd { found: 'b' });
    assert_eq!(span, Span::new(17, 18));
    assert_eq!(kind.class(), ErrorClass::Value);

    let (_, kind) = error_of("unit=A,,,;{ar=(f=A) ;}");
    assert_eq!(kind, ParseErrorKind::MalformedValueEnd { found: ' ' });
}

#[test]
fn test_missing_parameter_name() {
    let (_, kind) = error_of("unit=A,,,;{=g;}");
    assert_eq!(kind, ParseErrorKind::ExpectedParameterName);

    let (_, kind) = error_of("unit=A,,,;{ty g;}");
    assert_eq!(
        kind,
        ParseErrorKind::ExpectedChar {
            expected: '=',
            found: ' '
        }
    );
}

#[test]
fn test_unexpected_eof() {
    for source in ["unit=A", "unit=A,,,;", "unit=A,,,;{ty=g", "unit=A,,,;{ty=g;"] {
        let (_, kind) = error_of(source);
        assert_eq!(kind, ParseErrorKind::UnexpectedEof, "{source}");
    }
}

#[test]
fn test_error_is_last_event() {
    let events = parse("unit=A,,,;{ty=g;}\nunit=B,,,;{}");
    assert!(matches!(events.last(), Some(Event::Error { .. })));
    assert!(!events.contains(&Event::DocumentEnd));
    let errors = events
        .iter()
        .filter(|e| matches!(e, Event::Error { .. }))
        .count();
    assert_eq!(errors, 1);
}

#[test]
fn test_callback_can_stop() {
    struct FirstUnit<'src>(Option<&'src str>);

    impl<'src> ParseCallback<'src> for FirstUnit<'src> {
        fn event(&mut self, event: Event<'src>) -> bool {
            if let Event::UnitStart { name, .. } = event {
                self.0 = Some(name);
                return false;
            }
            true
        }
    }

    let mut first = FirstUnit(None);
    let ok = Parser::new("unit=A,,,;{ty=g;}unit=B,,,;{ty=g;}").parse(&mut first);
    assert!(!ok);
    assert_eq!(first.0, Some("A"));
}

#[test]
fn test_multibyte_names() {
    let events = parse("unit=ジョブ,,,;{cm=\"説明\";}");
    assert!(events.iter().any(|e| matches!(e, Event::UnitStart { name: "ジョブ", .. })));
    assert_eq!(tokens(&events), ["説明"]);
}
