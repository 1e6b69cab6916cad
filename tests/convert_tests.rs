use mdext::Engine;
use pretty_assertions::assert_eq;

fn convert(text: &str) -> String {
    Engine::new().convert(text)
}

#[test]
fn emphasis_variants() {
    assert_eq!(
        convert("**bold** and *em*"),
        "<p><strong>bold</strong> and <em>em</em></p>"
    );
    assert_eq!(convert("~~gone~~"), "<p><del>gone</del></p>");
    assert_eq!(convert("++new++"), "<p><ins>new</ins></p>");
    assert_eq!(convert("==noted=="), "<p><mark>noted</mark></p>");
    assert_eq!(convert("[[Ctrl]]"), "<p><kbd>Ctrl</kbd></p>");
}

#[test]
fn disabled_marking_renders_literal() {
    let mut engine = Engine::new();
    engine.set_setting("emphasis.marking", false).unwrap();
    assert_eq!(engine.convert("==noted=="), "<p>==noted==</p>");
}

#[test]
fn superscript_is_opt_in() {
    assert_eq!(convert("x^2^"), "<p>x^2^</p>");

    let mut engine = Engine::new();
    engine.set_setting("emphasis.superscript", true).unwrap();
    assert_eq!(engine.convert("x^2^"), "<p>x<sup>2</sup></p>");
}

#[test]
fn subscript_is_opt_in() {
    let mut engine = Engine::new();
    engine.set_setting("emphasis.subscript", true).unwrap();
    assert_eq!(engine.convert("H~2~O"), "<p>H<sub>2</sub>O</p>");
}

#[test]
fn inline_code_wins_over_other_constructs() {
    assert_eq!(convert("`*not em*`"), "<p><code>*not em*</code></p>");
}

#[test]
fn link_with_title_and_special_attributes() {
    assert_eq!(
        convert("[a](https://e.com \"T\"){#x .y}"),
        "<p><a href=\"https://e.com\" title=\"T\" id=\"x\" class=\"y\">a</a></p>"
    );
}

#[test]
fn image_takes_literal_alt_text() {
    assert_eq!(
        convert("![some *alt*](img.png)"),
        "<p><img src=\"img.png\" alt=\"some *alt*\" /></p>"
    );
}

#[test]
fn url_and_email_tags() {
    assert_eq!(
        convert("<https://e.com>"),
        "<p><a href=\"https://e.com\">https://e.com</a></p>"
    );
    assert_eq!(
        convert("<user@e.com>"),
        "<p><a href=\"mailto:user@e.com\">user@e.com</a></p>"
    );
}

#[test]
fn bare_urls_link_from_their_true_start() {
    assert_eq!(
        convert("go to https://e.com/x now"),
        "<p>go to <a href=\"https://e.com/x\">https://e.com/x</a> now</p>"
    );
}

#[test]
fn emoji_shortcodes() {
    assert_eq!(convert(":tada: done"), "<p>🎉 done</p>");
    // unknown shortcodes stay literal
    assert_eq!(convert(":notreal:"), "<p>:notreal:</p>");
}

#[test]
fn backslash_escapes_without_math() {
    assert_eq!(convert("\\*not em\\*"), "<p>*not em*</p>");
    assert_eq!(convert("\\(x\\)"), "<p>(x)</p>");
}

#[test]
fn inline_math_passes_through_once_enabled() {
    let mut engine = Engine::new();
    engine.set_setting("math", true).unwrap();
    assert_eq!(engine.convert("\\(a^2 + b^2\\)"), "<p>\\(a^2 + b^2\\)</p>");
}

#[test]
fn custom_inline_math_delimiters_register_their_trigger() {
    let mut engine = Engine::new();
    engine.set_setting("math", true).unwrap();
    engine
        .set_setting("math.inline.delimiters", vec![("$", "$")])
        .unwrap();
    assert_eq!(engine.convert("$x_i$"), "<p>$x_i$</p>");
}

#[test]
fn typographer_symbols() {
    assert_eq!(convert("(c) 2024 +- 1"), "<p>\u{a9} 2024 \u{b1} 1</p>");
}

#[test]
fn smart_punctuation_is_opt_in() {
    assert_eq!(convert("say \"hi\""), "<p>say &quot;hi&quot;</p>");

    let mut engine = Engine::new();
    engine.set_setting("smarty", true).unwrap();
    assert_eq!(
        engine.convert("say \"hi\" --- go"),
        "<p>say \u{201c}hi\u{201d} \u{2014} go</p>"
    );
}

#[test]
fn written_entities_survive_verbatim() {
    assert_eq!(convert("&copy; AT&T"), "<p>&copy; AT&amp;T</p>");
}

#[test]
fn reserved_characters_are_escaped() {
    assert_eq!(convert("a < b > c"), "<p>a &lt; b &gt; c</p>");
}

#[test]
fn hard_breaks() {
    assert_eq!(convert("a  \nb"), "<p>a<br />\nb</p>");
    assert_eq!(convert("a\\\nb"), "<p>a<br />\nb</p>");
}

#[test]
fn table_rowspan_via_caret_cells() {
    let out = convert("| A | B |\n| --- | --- |\n| tall | x |\n| ^ | y |");
    assert!(out.contains("<td rowspan=\"2\">tall</td>"), "{out}");
    assert!(out.contains("<tr><td>y</td></tr>"), "{out}");
}

#[test]
fn tablespan_disabled_keeps_marker_cells() {
    let mut engine = Engine::new();
    engine.set_setting("tables.tablespan", false).unwrap();
    let out = engine.convert("| > | wide |\n| --- | --- |\n| a | b |");
    assert!(out.contains("<th>&gt;</th>"), "{out}");
    assert!(!out.contains("colspan"), "{out}");
}

#[test]
fn escaped_pipes_stay_inside_cells() {
    let out = convert("| a\\|b | c |\n| --- | --- |\n| 1 | 2 |");
    assert!(out.contains("<th>a|b</th>"), "{out}");
}

#[test]
fn conversion_is_deterministic_across_runs() {
    let source = "# T\n\n| a | b |\n| - | - |\n| 1 | 2 |\n\n- [x] done\n";
    assert_eq!(convert(source), convert(source));
}
