use collective_actions::{locate, replace, DataError, Fragment};
use rstest::rstest;

const VALID: &str = "<div id=\"actions\">\n<table><tr><td class=\"field-key\">company</td>\
                     <td class=\"field-value\">Acme</td></tr></table>\n</div>";

fn wrap(body: &str) -> String {
    format!("Intro paragraph with <b>inline html</b>.\n\n{body}\n\n- a list\n- of things\n")
}

#[rstest]
#[case::none("no containers at all")]
#[case::different_id("<div id=\"other\">\n</div>")]
#[case::id_in_content_only("<div class=\"note\">actions</div>")]
#[case::prefixed_attribute("<div data-id=\"actions\">\n</div>")]
fn reports_missing_containers(#[case] body: &str) {
    let result = locate(&wrap(body), "actions");
    assert!(matches!(result, Err(DataError::NotFound { .. })));
}

#[rstest]
#[case::twice(format!("{VALID}\n{VALID}"))]
#[case::nested(format!("<div id=\"actions\">{VALID}</div>"))]
fn reports_duplicate_containers(#[case] body: String) {
    let result = locate(&wrap(&body), "actions");
    assert!(matches!(result, Err(DataError::MultipleFound { .. })));
}

#[rstest]
#[case::unknown_label("<tr><td class=\"field-key\">city</td><td class=\"field-value\">x</td></tr>")]
#[case::too_many_rows(&"<tr><td class=\"field-key\">company</td><td class=\"field-value\">x</td></tr>".repeat(9))]
fn reports_malformed_containers(#[case] rows: &str) {
    let doc = wrap(&format!("<div id=\"actions\"><table>{rows}</table></div>"));
    assert!(matches!(
        locate(&doc, "actions"),
        Err(DataError::Malformed { .. })
    ));
}

#[rstest]
#[case::double_quotes("<div id=\"actions\">\n</div>")]
#[case::single_quotes("<div class=\"data\" id='actions'>\n</div>")]
#[case::unquoted("<div id=actions>\n</div>")]
fn finds_the_container(#[case] container: &str) {
    let fragment = locate(&wrap(container), "actions").unwrap();
    assert_eq!(fragment.as_str(), container);
}

#[test]
fn replace_keeps_every_other_byte() {
    let doc = wrap(VALID);
    let fragment = Fragment::new("<div id=\"actions\">\n  <table>\n  </table>\n</div>").unwrap();

    let updated = replace(&doc, "actions", &fragment).unwrap();
    assert_eq!(updated, wrap(fragment.as_str()));
}

#[test]
fn replace_refuses_invalid_fragments() {
    let fragment = Fragment::new(
        "<div id=\"actions\"><table><tr><td class=\"field-key\">city</td></tr></table></div>",
    )
    .unwrap();
    assert!(matches!(
        replace(&wrap(VALID), "actions", &fragment),
        Err(DataError::Malformed { .. })
    ));
}
