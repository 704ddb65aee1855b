use codepad_core::{compose, SourceKind, SourceSet};

#[test]
fn compose_is_markup_then_style_then_script_regardless_of_edit_order() {
    let mut a = SourceSet::default();
    a.set(SourceKind::Script, "console.log(1)");
    a.set(SourceKind::Style, "body{margin:0}");
    a.set(SourceKind::Markup, "<main></main>");

    let mut b = SourceSet::default();
    b.set(SourceKind::Markup, "<main></main>");
    b.set(SourceKind::Style, "body{margin:0}");
    b.set(SourceKind::Script, "console.log(1)");

    let expected = "<main></main><style>body{margin:0}</style><script>console.log(1)</script>";
    assert_eq!(compose(&a).as_str(), expected);
    assert_eq!(compose(&b).as_str(), expected);
}

#[test]
fn compose_reference_scenario() {
    let mut set = SourceSet::default();
    set.set(SourceKind::Markup, "<h1>Hi</h1>");
    set.set(SourceKind::Style, "h1{color:red}");

    assert_eq!(
        compose(&set).as_str(),
        "<h1>Hi</h1><style>h1{color:red}</style><script></script>"
    );
}

#[test]
fn compose_is_referentially_transparent() {
    let set = SourceSet::new("<div id=a></div>", "#a{}", "document.getElementById('a')");
    assert_eq!(compose(&set), compose(&set));
}

#[test]
fn compose_does_not_escape_or_validate_content() {
    let set = SourceSet::new("</style>", "<script>", "</script><b>");
    assert_eq!(
        compose(&set).as_str(),
        "</style><style><script></style><script></script><b></script>"
    );
}
