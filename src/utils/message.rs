/// Upper bound for one outgoing chunk, in UTF-16 code units.
///
/// Kept below Telegram's 4096-unit limit; part markers count against it.
pub const MAX_CHUNK_LEN: usize = 4000;

/// Splits `text` into chunks of at most `max_len` UTF-16 units.
///
/// Every line keeps its trailing newline and chunks break only between lines,
/// so the chunks concatenate back to `text` (plus a final newline if it had
/// none). A single line longer than `max_len` is the one exception: it is cut
/// at character boundaries so no chunk exceeds the limit.
///
/// The limit does not account for part markers; use
/// [`split_with_part_markers`] for text that is sent as is.
///
/// ```
/// use rail_schedule_bot::utils::message::split_message;
///
/// assert_eq!(split_message("Hello\nWorld", 4000), vec!["Hello\nWorld\n"]);
/// ```
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(2);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    let body = text.strip_suffix('\n').unwrap_or(text);
    for line in body.split('\n') {
        let line_len = utf16_len(line) + 1;

        if line_len > max_len {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            chunks.extend(hard_wrap(line, max_len));
            continue;
        }

        if current_len + line_len > max_len {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push_str(line);
        current.push('\n');
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Splits `text` like [`split_message`] and marks every chunk after the first
/// with its part number. Room for the marker is reserved up front, so marked
/// chunks stay within `max_len` too.
pub fn split_with_part_markers(text: &str, max_len: usize) -> Vec<String> {
    let mut reserve = 0;
    loop {
        let chunks = split_message(text, max_len.saturating_sub(reserve));
        let total = chunks.len();
        let needed = if total > 1 {
            utf16_len(&part_marker(total, total))
        } else {
            0
        };
        // Markers only grow with the part count, so the reserve never shrinks.
        if needed <= reserve {
            return with_part_markers(chunks);
        }
        reserve = needed;
    }
}

/// Prefixes every chunk after the first with "(part X of Y)".
pub fn with_part_markers(chunks: Vec<String>) -> Vec<String> {
    let total = chunks.len();
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            if i == 0 {
                chunk
            } else {
                format!("{}{}", part_marker(i + 1, total), chunk)
            }
        })
        .collect()
}

pub fn part_marker(part: usize, total: usize) -> String {
    format!("(חלק {part} מתוך {total})\n")
}

fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

fn hard_wrap(line: &str, max_len: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_len = 0;
    // One unit of each piece is reserved for the newline.
    for ch in line.chars() {
        let ch_len = ch.len_utf16();
        if piece_len + ch_len + 1 > max_len {
            piece.push('\n');
            pieces.push(std::mem::take(&mut piece));
            piece_len = 0;
        }
        piece.push(ch);
        piece_len += ch_len;
    }
    piece.push('\n');
    pieces.push(piece);
    pieces
}
