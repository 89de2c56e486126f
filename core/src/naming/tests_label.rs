use crate::naming::{GreekLetter, Label, LabelBase, LabelError, View};

#[test]
fn test_parse_latin_with_view_suffix() {
    let label: Label = "r1".parse().unwrap();
    assert_eq!(label.base, LabelBase::Latin("r".into()));
    assert_eq!(label.view, Some(View::Horizontal));
    assert!(!label.bracketed);

    let label: Label = "AB2".parse().unwrap();
    assert_eq!(label.base, LabelBase::Latin("AB".into()));
    assert_eq!(label.view, Some(View::Frontal));
}

#[test]
fn test_single_digit_is_not_a_suffix() {
    // A bare "1" has nothing left to be a base
    let label: Label = "1".parse().unwrap();
    assert_eq!(label.base, LabelBase::Latin("1".into()));
    assert_eq!(label.view, None);
}

#[test]
fn test_ground_label() {
    let label: Label = "x".parse().unwrap();
    assert!(label.is_ground());
    assert_eq!(Label::ground().to_string(), "x");
}

#[test]
fn test_parse_greek_name_and_glyph() {
    let by_name: Label = "alpha".parse().unwrap();
    let by_glyph: Label = "α".parse().unwrap();
    assert_eq!(by_name, by_glyph);
    assert_eq!(by_name.base, LabelBase::Greek(GreekLetter::Alpha));
    assert_eq!(by_name.to_string(), "α");
}

#[test]
fn test_parse_trace_prefix() {
    let h: Label = "hα".parse().unwrap();
    assert_eq!(h.view, Some(View::Horizontal));
    assert_eq!(h.base, LabelBase::Greek(GreekLetter::Alpha));

    let f: Label = "fbeta".parse().unwrap();
    assert_eq!(f.view, Some(View::Frontal));
    assert_eq!(f.to_string(), "fβ");
}

#[test]
fn test_bracketed_labels() {
    let line_point: Label = "(r1)".parse().unwrap();
    assert!(line_point.bracketed);
    assert_eq!(line_point.base_label(), Label::latin("r"));
    assert_eq!(line_point.to_string(), "(r1)");

    let family: Label = "(hα)".parse().unwrap();
    assert!(family.bracketed);
    assert!(family.is_greek());
    assert_eq!(family.to_string(), "(hα)");
}

#[test]
fn test_display_inverts_parse() {
    for text in ["A1", "B2", "r", "(s2)", "hω", "fϑ", "(fσ)", "ς", "x"] {
        let label: Label = text.parse().unwrap();
        assert_eq!(label.to_string(), text, "display of {:?}", label);
    }
}

#[test]
fn test_in_view_keeps_base() {
    let r = Label::latin("r");
    assert_eq!(r.in_view(View::Horizontal).to_string(), "r1");
    assert_eq!(r.in_view(View::Frontal).to_string(), "r2");

    let alpha = Label::greek(GreekLetter::Alpha);
    assert_eq!(alpha.in_view(View::Frontal).to_string(), "fα");
    assert_eq!(alpha.in_view(View::Horizontal).into_bracketed().to_string(), "(hα)");
}

#[test]
fn test_rejects_bad_labels() {
    assert_eq!("".parse::<Label>(), Err(LabelError::Empty));
    assert_eq!("()".parse::<Label>(), Err(LabelError::Empty));
    assert!(matches!("r-1".parse::<Label>(), Err(LabelError::InvalidCharacter(_))));
    assert!(matches!("hä".parse::<Label>(), Err(LabelError::InvalidCharacter(_))));
}

#[test]
fn test_all_letters_round_trip_through_glyph() {
    assert_eq!(GreekLetter::ALL.len(), 27);
    for letter in GreekLetter::ALL {
        assert_eq!(GreekLetter::parse(&letter.glyph().to_string()), Some(*letter));
        assert_eq!(GreekLetter::parse(letter.name()), Some(*letter));
    }
}

#[test]
fn test_serde_uses_display_string() {
    let label: Label = "(hα)".parse().unwrap();
    let json = serde_json::to_string(&label).unwrap();
    assert_eq!(json, "\"(hα)\"");
    let back: Label = serde_json::from_str(&json).unwrap();
    assert_eq!(back, label);
    assert!(serde_json::from_str::<Label>("\"a b\"").is_err());
}
