// Benchmark helpers are used from other files in this directory, which the
// dead code lint can't see.
#[allow(dead_code)]
pub fn generate_notes(sections: usize) -> String {
    let base = "## Meeting notes %hl-blue%\n\nAgenda was long.\nDecided to ship on Friday %hl-green%\nNeed to tell ops %hl-red%\n\n- Review budget %hl-yellow%\n- Book rooms\n  - Ask about projector %hl-gray%\n\n```\nlet marker = \"%hl-red%\";\n```\n\n";
    let mut content = String::with_capacity(base.len() * sections);
    for section in 0..sections {
        content.push_str(&format!("# Day {section}\n\n"));
        content.push_str(base);
    }
    content
}

#[allow(dead_code)]
pub fn generate_plain_lines(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("line {i} of plain text"))
        .collect::<Vec<_>>()
        .join("\n")
}
