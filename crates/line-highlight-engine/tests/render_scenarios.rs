use line_highlight_engine::render::{render_line, segment_lines, LogicalLine, RenderedLinePair};
use line_highlight_engine::{
    Block, BlockKind, ColorTag, Node, process_blocks, render_document_html, render_reading_view,
};
use pretty_assertions::assert_eq;

#[test]
fn remember_this_renders_block_and_pill() {
    let blocks = render_reading_view("Remember this! %hl-yellow%");

    insta::assert_snapshot!(
        render_document_html(&blocks),
        @r#"<p><span class="hl-block-container"><span class="hl-block" style="background:rgb(255, 250, 205);border-radius:0.25em;">Remember this!</span></span><span class="hl-inline-container">Remember this! <span class="hl-inline-marker" style="background:rgb(255, 250, 205);color:#666;">%hl-yellow%</span></span></p>"#
    );
}

#[test]
fn only_the_marked_line_of_three_is_highlighted() {
    let blocks = render_reading_view("first line\nsecond line %hl-red%\nthird line");

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].break_count(), 2);

    let lines = segment_lines(&blocks[0].children);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], LogicalLine::new(vec![Node::text("first line")]));
    assert_eq!(lines[2], LogicalLine::new(vec![Node::text("third line")]));

    insta::assert_snapshot!(
        render_document_html(&blocks),
        @r#"<p>first line<br><span class="hl-block-container"><span class="hl-block" style="background:rgb(255, 237, 237);border-radius:0.25em;">second line</span></span><span class="hl-inline-container">second line <span class="hl-inline-marker" style="background:rgb(255, 237, 237);color:#666;">%hl-red%</span></span><br>third line</p>"#
    );
}

#[test]
fn mid_line_marker_round_trips_unmodified() {
    let source = "Use %hl-blue% to mark blue lines";
    let mut blocks = line_highlight_engine::render::render_markdown(source);
    let before = blocks.clone();

    process_blocks(&mut blocks);

    assert_eq!(blocks, before);
}

#[test]
fn zero_break_block_is_a_single_line() {
    let nodes = vec![
        Node::text("a "),
        Node::Element(line_highlight_engine::Element::new("em").with_child(Node::text("b"))),
        Node::text(" c"),
    ];

    let lines = segment_lines(&nodes);

    assert_eq!(lines, vec![LogicalLine::new(nodes)]);
}

#[test]
fn formatting_before_marker_survives_in_both_fragments() {
    let blocks = render_reading_view("**Important**: call back %hl-pink%");

    insta::assert_snapshot!(
        render_document_html(&blocks),
        @r#"<p><span class="hl-block-container"><span class="hl-block" style="background:rgb(255, 235, 247);border-radius:0.25em;"><strong>Important</strong>: call back</span></span><span class="hl-inline-container"><strong>Important</strong>: call back <span class="hl-inline-marker" style="background:rgb(255, 235, 247);color:#666;">%hl-pink%</span></span></p>"#
    );
}

#[test]
fn excluded_blocks_keep_their_markers() {
    let source = "```\nlet x = 1; %hl-red%\n```\n\n| a %hl-red% |\n|---|\n| b |\n";
    let blocks = render_reading_view(source);

    assert_eq!(blocks.len(), 2);
    assert!(matches!(blocks[0].kind, BlockKind::CodeBlock { .. }));
    assert_eq!(blocks[0].text_content(), "let x = 1; %hl-red%");
    assert_eq!(blocks[1].kind, BlockKind::Table);
    assert!(blocks[1].text_content().contains("%hl-red%"));
}

#[test]
fn list_items_and_headings_are_processed() {
    let blocks = render_reading_view("# Plan %hl-green%\n\n- step one %hl-blue%\n- step two\n");
    let html = render_document_html(&blocks);

    assert!(html.starts_with("<h1><span class=\"hl-block-container\">"));
    assert!(html.contains("<li><span class=\"hl-block-container\">"));
    assert!(html.ends_with("<li>step two</li></ul>"));

    let raw = line_highlight_engine::render::render_markdown("- step one %hl-blue%");
    let Block { children, .. } = &raw[0];
    let pair = render_line(&LogicalLine::new(children.clone()));
    assert!(matches!(
        pair,
        RenderedLinePair::Highlighted {
            color: ColorTag::Blue,
            ..
        }
    ));
}

#[test]
fn inline_br_separates_highlighted_lines() {
    let blocks = render_reading_view("one<br>two %hl-red%");

    assert_eq!(blocks[0].break_count(), 1);
    insta::assert_snapshot!(
        render_document_html(&blocks),
        @r#"<p>one<br><span class="hl-block-container"><span class="hl-block" style="background:rgb(255, 237, 237);border-radius:0.25em;">two</span></span><span class="hl-inline-container">two <span class="hl-inline-marker" style="background:rgb(255, 237, 237);color:#666;">%hl-red%</span></span></p>"#
    );
}

#[test]
fn marker_written_as_inline_code_is_left_alone() {
    let source = "see `%hl-red%`";
    let mut blocks = line_highlight_engine::render::render_markdown(source);
    let before = blocks.clone();

    process_blocks(&mut blocks);

    assert_eq!(blocks, before);
}
