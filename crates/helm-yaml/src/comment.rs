/// Width of the `# ` marker that precedes every non-empty comment line.
pub(crate) const MARKER_WIDTH: usize = 2;

/// Split comment text into output lines, re-flowing each source line to fit
/// within `budget` columns.
///
/// The budget counts the `indent` the lines will be written at plus the
/// two-column `# ` marker. A budget of `0` disables wrapping. Empty source
/// lines are kept as empty output lines. A word wider than the budget gets a
/// line of its own and is never split.
pub fn wrap_comment(text: &str, budget: usize, indent: usize) -> Vec<String> {
    let room = budget.saturating_sub(indent + MARKER_WIDTH);
    let mut lines = Vec::new();
    for source in text.split('\n') {
        if source.is_empty() {
            lines.push(String::new());
        } else if budget == 0 {
            lines.push(source.to_string());
        } else {
            reflow(source, room, &mut lines);
        }
    }
    lines
}

/// Greedily pack the words of `source` into lines of at most `room` chars.
fn reflow(source: &str, room: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut width = 0;
    for word in source.split_whitespace() {
        let word_width = word.chars().count();
        if width > 0 && width + 1 + word_width > room {
            lines.push(core::mem::take(&mut current));
            width = 0;
        }
        if width > 0 {
            current.push(' ');
            width += 1;
        }
        current.push_str(word);
        width += word_width;
    }
    // Whitespace-only lines still produce one (empty) line.
    lines.push(current);
}
