use xml_equiv_core::{compare_str, DiffConfiguration, DiffResult, DifferenceType, XmlDiff};

fn compare(control: &str, test: &str) -> DiffResult {
    compare_str(control, test, &DiffConfiguration::default())
        .unwrap_or_else(|err| panic!("comparing {control} to {test}: {err}"))
}

fn kinds(result: &DiffResult) -> Vec<DifferenceType> {
    result.differences().iter().map(|d| d.kind()).collect()
}

// Each pair is checked in both directions and each side against itself.
fn assert_pairs(left: &[&str], right: &[&str], expected: bool) {
    for (control, test) in left.iter().zip(right) {
        for (a, b, want) in [
            (control, test, expected),
            (test, control, expected),
            (control, control, true),
            (test, test, true),
        ] {
            let result = compare(a, b);
            assert_eq!(
                result.is_equal(),
                want,
                "comparing {a} to {b}: {result}"
            );
        }
    }
}

#[test]
fn same_document_is_equal_without_reading() {
    let mut diff = XmlDiff::same("<empty/>", DiffConfiguration::default());
    assert!(diff.compare().expect("compare").is_equal());
}

#[test]
fn repeated_compare_returns_same_result() {
    let mut diff = XmlDiff::new("<empty/>", "<empty>text</empty>");

    let first: *const DiffResult = diff.compare().expect("first");
    let second: *const DiffResult = diff.compare().expect("second");

    assert!(std::ptr::eq(first, second));
}

#[test]
fn empty_element_encodings_are_equal() {
    assert_pairs(
        &["<empty/>", "<empty></empty>", "<empty/>"],
        &["<empty/>", "<empty></empty>", "<empty></empty>"],
        true,
    );
}

#[test]
fn empty_and_non_empty_elements_differ() {
    assert_pairs(
        &["<empty/>", "<empty></empty>", "<empty><empty/></empty>"],
        &[
            "<empty>text</empty>",
            "<empty>text</empty>",
            "<empty>text</empty>",
        ],
        false,
    );

    let result = compare("<empty/>", "<empty>text</empty>");
    assert!(kinds(&result).contains(&DifferenceType::ChildNodelistLength));
}

#[test]
fn different_elements_differ() {
    assert_pairs(
        &["<a><b/></a>", "<a><b/></a>", "<a><b/></a>"],
        &["<b><a/></b>", "<a><c/></a>", "<a><b><c/></b></a>"],
        false,
    );
}

#[test]
fn tag_mismatch_stops_before_children() {
    let result = compare("<a><b/></a>", "<b><a/></b>");
    assert_eq!(kinds(&result), vec![DifferenceType::ElementTagName]);
}

#[test]
fn different_attribute_counts_differ() {
    assert_pairs(
        &[r#"<a><b x="1"/></a>"#, r#"<a><b x="1"/></a>"#],
        &["<a><b/></a>", r#"<a><b x="1" y="2"/></a>"#],
        false,
    );

    let result = compare("<a><b/></a>", r#"<a><b x="1" y="2"/></a>"#);
    assert_eq!(kinds(&result), vec![DifferenceType::ElementNumAttributes]);
}

#[test]
fn different_attribute_values_differ() {
    assert_pairs(
        &[r#"<a><b x="1"/></a>"#, r#"<a><b x="1" y="2"/></a>"#],
        &[r#"<a><b x="2"/></a>"#, r#"<a><b x="1" y="3"/></a>"#],
        false,
    );
}

#[test]
fn different_attribute_names_differ() {
    assert_pairs(
        &[r#"<a><b x="1"/></a>"#, r#"<a><b x="1" y="2"/></a>"#],
        &[r#"<a><b y="2"/></a>"#, r#"<a><b x="1" z="3"/></a>"#],
        false,
    );

    let result = compare(r#"<a><b x="1" y="2"/></a>"#, r#"<a><b x="1" z="3"/></a>"#);
    assert_eq!(
        kinds(&result),
        vec![
            DifferenceType::AttrSequence,
            DifferenceType::AttrNameNotFound
        ]
    );
}

#[test]
fn attribute_order_is_not_significant() {
    assert_pairs(
        &[r#"<a x="1" y="2" z="3"/>"#, r#"<a><b x="1" y="2"/></a>"#],
        &[r#"<a y="2" z="3" x="1"/>"#, r#"<a><b y="2" x="1"/></a>"#],
        true,
    );

    let result = compare(r#"<a x="1" y="2" z="3"/>"#, r#"<a y="2" z="3" x="1"/>"#);
    assert!(!result.is_identical());
    assert!(kinds(&result)
        .iter()
        .all(|kind| *kind == DifferenceType::AttrSequence));
}

#[test]
fn reordered_attributes_with_changed_value_differ() {
    assert_pairs(
        &[r#"<a x="1" y="2" z="3"/>"#, r#"<a><b x="1" y="2"/></a>"#],
        &[r#"<a y="2" z="3" x="2"/>"#, r#"<a><b y="1" x="1"/></a>"#],
        false,
    );

    let result = compare(r#"<a x="1" y="2" z="3"/>"#, r#"<a y="2" z="3" x="2"/>"#);
    assert_eq!(
        result.halting_difference().map(|d| d.kind()),
        Some(DifferenceType::AttrValue)
    );
}

#[test]
fn text_values_are_compared_exactly() {
    let result = compare("<a>Text</a>", "<a>text</a>");
    assert_eq!(kinds(&result), vec![DifferenceType::TextValue]);

    assert!(compare("<a>&lt;x&gt;</a>", "<a><![CDATA[<x>]]></a>")
        .differences()
        .iter()
        .any(|d| d.kind() == DifferenceType::NodeType));
}

#[test]
fn missing_trailing_nodes_on_test_side_differ() {
    let result = compare("<a><b/><c/></a>", "<a><b/></a>");
    assert_eq!(
        result.halting_difference().map(|d| d.kind()),
        Some(DifferenceType::NodeType)
    );

    let result = compare("<a/><!--tail-->", "<a/>");
    assert_eq!(kinds(&result), vec![DifferenceType::ChildNodelistLength]);
}
