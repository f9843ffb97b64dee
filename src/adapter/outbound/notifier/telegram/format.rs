//! Message formatting for Telegram notifications.

use crate::port::outbound::notifier::Block;

/// Telegram's maximum message length in characters.
pub const MESSAGE_LIMIT: usize = 4096;

const SEPARATOR: &str = "\n\n";

/// Render a block as one or more `MarkdownV2` messages of at most `limit`
/// characters. Splits only between parts (title, description, fields); a
/// single part longer than `limit` is truncated.
pub fn render_block(block: &Block, limit: usize) -> Vec<String> {
    let mut parts = Vec::with_capacity(block.fields.len() + 2);
    parts.push(format!("*{}*", escape_markdown(&block.title)));
    if let Some(description) = &block.description {
        parts.push(escape_markdown(description));
    }
    for field in &block.fields {
        parts.push(format!(
            "*{}*\n{}",
            escape_markdown(&field.name),
            escape_markdown(&field.value)
        ));
    }
    pack(parts, limit)
}

fn pack(parts: Vec<String>, limit: usize) -> Vec<String> {
    let separator_len = SEPARATOR.chars().count();
    let mut messages = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for part in parts {
        let part = fit(part, limit);
        let part_len = part.chars().count();

        if !current.is_empty() && current_len + separator_len + part_len > limit {
            messages.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push_str(SEPARATOR);
            current_len += separator_len;
        }
        current.push_str(&part);
        current_len += part_len;
    }

    if !current.is_empty() {
        messages.push(current);
    }
    messages
}

/// Cut an escaped part down to `limit` characters without leaving a
/// dangling escape.
fn fit(part: String, limit: usize) -> String {
    if part.chars().count() <= limit {
        return part;
    }
    let mut cut: String = part.chars().take(limit.saturating_sub(1)).collect();
    let trailing = cut.chars().rev().take_while(|c| *c == '\\').count();
    if trailing % 2 == 1 {
        cut.pop();
    }
    cut.push('…');
    cut
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.',
        '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}
