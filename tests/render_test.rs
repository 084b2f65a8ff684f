//! Integration tests for section rendering.

use docxbook::render::{runs_to_html, Fragment};
use docxbook::{
    render_section, Catalog, FragmentKind, Paragraph, ParagraphClassifier, PatternExclusion,
    RenderOptions, SectionRenderer, TextRun,
};

fn renderer() -> SectionRenderer {
    SectionRenderer::from_catalog(&Catalog::builtin()).unwrap()
}

#[test]
fn test_bold_and_bold_italic_runs() {
    let para = Paragraph::from_runs([TextRun::bold("Hello "), TextRun::bold_italic("world")]);

    assert_eq!(
        runs_to_html(&para),
        "<strong>Hello </strong><strong><em>world</em></strong>"
    );

    let classifier = ParagraphClassifier::new();
    assert_eq!(classifier.classify(&para), FragmentKind::Heading);
    assert_eq!(
        Fragment::from_paragraph(&para, FragmentKind::Heading).to_string(),
        "<h2>Hello world</h2>"
    );
}

#[test]
fn test_blank_paragraph_does_not_use_skip_slot() {
    let paras = vec![
        Paragraph::with_text("1. Preface (about me and math)"),
        Paragraph::with_text("   "),
        Paragraph::new(),
    ];
    let result = renderer().render_with_stats(&paras);
    assert_eq!(result.content, "");
    assert_eq!(result.stats.title_skipped, 1);
    assert_eq!(result.stats.blank_skipped, 2);

    let leading_blank = vec![
        Paragraph::new(),
        Paragraph::with_text("Title"),
        Paragraph::with_text("Kept"),
    ];
    assert_eq!(renderer().render(&leading_blank), "<p>Kept</p>");
}

#[test]
fn test_boilerplate_dropped_regardless_of_styling() {
    let paras = vec![
        Paragraph::with_text("10. Calculus (don't be afraid of change)"),
        Paragraph::with_text("Limits first."),
        Paragraph::from_runs([TextRun::bold("Linear Algebra (Matrix Re-lative)")]),
        Paragraph::from_runs([TextRun::italic("   Linear Algebra (Matrix Re-lative) ")]),
        Paragraph::with_text("Then derivatives."),
    ];
    let result = renderer().render_with_stats(&paras);
    assert_eq!(result.content, "<p>Limits first.</p>\n<p>Then derivatives.</p>");
    assert_eq!(result.stats.boilerplate_skipped, 2);
}

#[test]
fn test_text_without_runs_renders_plain() {
    let paras = vec![
        Paragraph::with_text("- a <linked> item"),
        Paragraph::with_text("plain & simple"),
    ];
    let html = render_section(&paras, &Catalog::builtin(), false).unwrap();
    assert_eq!(
        html,
        "<p class=\"list-item\">- a &lt;linked&gt; item</p>\n<p>plain &amp; simple</p>"
    );
}

#[test]
fn test_list_items_keep_inline_emphasis() {
    let paras = vec![
        Paragraph::from_runs([TextRun::new("\u{2022} "), TextRun::italic("slanted")]),
        Paragraph::from_runs([TextRun::new("- "), TextRun::bold("strong"), TextRun::new(" end")]),
    ];
    let html = render_section(&paras, &Catalog::builtin(), false).unwrap();
    assert_eq!(
        html,
        "<p class=\"list-item\">\u{2022} <em>slanted</em></p>\n\
         <p class=\"list-item\">- <strong>strong</strong> end</p>"
    );
}

#[test]
fn test_numbered_bold_item_is_body_text() {
    let paras = vec![Paragraph::from_runs([TextRun::bold(
        "1. Multiplication distributes over addition",
    )])];
    let html = render_section(&paras, &Catalog::builtin(), false).unwrap();
    assert_eq!(
        html,
        "<p><strong>1. Multiplication distributes over addition</strong></p>"
    );
}

#[test]
fn test_long_bold_paragraph_is_body_text() {
    let text = "Bold ".repeat(21);
    let paras = vec![Paragraph::from_runs([TextRun::bold(text.clone())])];
    let html = render_section(&paras, &Catalog::builtin(), false).unwrap();
    assert_eq!(html, format!("<p><strong>{}</strong></p>", text));

    let at_limit = "b".repeat(100);
    let paras = vec![Paragraph::from_runs([TextRun::bold(at_limit.clone())])];
    let html = render_section(&paras, &Catalog::builtin(), false).unwrap();
    assert_eq!(html, format!("<h2>{}</h2>", at_limit));
}

#[test]
fn test_custom_exclusion_and_limits() {
    let classifier = ParagraphClassifier::new()
        .with_max_heading_chars(10)
        .with_exclusion(PatternExclusion::new(r"^Note").unwrap())
        .with_list_prefixes(["* "]);
    let renderer =
        SectionRenderer::new(RenderOptions::new().with_skip_title(false)).with_classifier(classifier);

    let paras = vec![
        Paragraph::from_runs([TextRun::bold("Short")]),
        Paragraph::from_runs([TextRun::bold("Note this")]),
        Paragraph::from_runs([TextRun::bold("Much too long")]),
        Paragraph::with_text("* star"),
        Paragraph::with_text("- dash"),
    ];
    let result = renderer.render_with_stats(&paras);
    assert_eq!(
        result.content,
        "<h2>Short</h2>\n\
         <p><strong>Note this</strong></p>\n\
         <p><strong>Much too long</strong></p>\n\
         <p class=\"list-item\">* star</p>\n\
         <p>- dash</p>"
    );
    assert_eq!(result.stats.heading_count, 1);
    assert_eq!(result.stats.list_item_count, 1);
    assert_eq!(result.stats.paragraph_count, 3);
}

#[test]
fn test_rendering_is_pure() {
    let paras = vec![
        Paragraph::with_text("Title"),
        Paragraph::from_runs([TextRun::bold("Sub")]),
        Paragraph::with_text("Body"),
    ];
    let renderer = renderer();
    assert_eq!(renderer.render(&paras), renderer.render(&paras));
    assert_eq!(renderer.render(&paras), "<h2>Sub</h2>\n<p>Body</p>");
}
