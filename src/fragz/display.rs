//! Short, human-readable labels for fragments loaded from files.

use std::path::Path;

pub const DEFAULT_DISPLAY_WIDTH: usize = 15;
const ELLIPSIS: &str = "...";

/// Label for a path: its final component, shortened to `max_len` code points.
pub fn display_name(path: &str, max_len: usize) -> String {
    let base = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    shorten_filename(&base, max_len)
}

/// Shortens a file name to at most `max_len` code points, keeping the extension.
///
/// `"a_very_long_filename.txt"` with a budget of 15 becomes `"a_very_l....txt"`.
/// When the extension itself leaves no room for the base name, the name is cut
/// to `max_len - 3` bytes (backed off to a char boundary) plus the ellipsis.
pub fn shorten_filename(filename: &str, max_len: usize) -> String {
    let len = filename.chars().count();
    if len <= max_len {
        return filename.to_string();
    }

    let (name, ext) = split_extension(filename);
    let ext_len = ext.chars().count() as isize;
    let available = max_len as isize - ext_len - ELLIPSIS.len() as isize;

    if available < 1 {
        let cut = floor_char_boundary(filename, max_len.saturating_sub(ELLIPSIS.len()));
        return format!("{}{}", &filename[..cut], ELLIPSIS);
    }

    let available = available as usize;
    if name.chars().count() > available {
        let head: String = name.chars().take(available).collect();
        return format!("{}{}{}", head, ELLIPSIS, ext);
    }

    filename.to_string()
}

/// Splits at the last `.`; the extension keeps its dot. `".bashrc"` is all extension.
fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(idx) => filename.split_at(idx),
        None => (filename, ""),
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_unchanged() {
        assert_eq!(shorten_filename("notes.txt", 15), "notes.txt");
        assert_eq!(shorten_filename("exactly_15_.txt", 15), "exactly_15_.txt");
    }

    #[test]
    fn long_names_keep_extension() {
        let short = shorten_filename("a_very_long_filename.txt", 15);
        assert_eq!(short, "a_very_l....txt");
        assert_eq!(short.chars().count(), 15);
        assert!(short.ends_with(".txt"));
    }

    #[test]
    fn counts_code_points_not_bytes() {
        // 10 code points, 20 bytes
        let name = "привет.txt";
        assert_eq!(shorten_filename(name, 15), name);

        let long = "очень_длинное_имя.txt";
        let short = shorten_filename(long, 15);
        assert_eq!(short, "очень_дл....txt");
        assert_eq!(short.chars().count(), 15);
    }

    #[test]
    fn names_without_extension() {
        assert_eq!(
            shorten_filename("abcdefghijklmnopqrstuvwxyz", 15),
            "abcdefghijkl..."
        );
    }

    #[test]
    fn long_extension_falls_back_to_prefix_cut() {
        let short = shorten_filename("x.extremely_long_extension", 15);
        assert_eq!(short, "x.extremely_...");
    }

    #[test]
    fn prefix_cut_never_splits_a_char() {
        // Extension consumes the whole budget; the 12-byte cut lands inside 'ж'
        let name = "xааааажж.ааааааааааааааа";
        let short = shorten_filename(name, 15);
        assert_eq!(short, "xааааа...");
    }

    #[test]
    fn display_name_uses_final_component() {
        assert_eq!(display_name("/home/u/docs/report.txt", 15), "report.txt");
        assert_eq!(
            display_name("/data/a_very_long_filename.txt", DEFAULT_DISPLAY_WIDTH),
            "a_very_l....txt"
        );
    }
}
