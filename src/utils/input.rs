//! Input cleanup for typed and pasted text.

/// Sanitize text for the TUI input box.
///
/// - Converts tabs to 4 spaces
/// - Converts carriage returns to newlines
/// - Filters out control characters except newlines
pub fn sanitize_text_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\t' => sanitized.push_str("    "),
            '\r' => sanitized.push('\n'),
            '\n' => sanitized.push(c),
            _ if !c.is_control() => sanitized.push(c),
            _ => {}
        }
    }

    sanitized
}

/// Prepare typed text for sending as one transcript turn.
///
/// Each run of line breaks becomes a single space; the transcript is line
/// oriented, so a message must stay on one line. Everything else is sent
/// as typed.
pub fn sanitize_message(text: &str) -> String {
    let mut message = String::with_capacity(text.len());
    let mut previous_break = false;

    for c in text.chars() {
        if matches!(c, '\n' | '\r') {
            if !previous_break {
                message.push(' ');
            }
            previous_break = true;
        } else {
            message.push(c);
            previous_break = false;
        }
    }

    message
}
