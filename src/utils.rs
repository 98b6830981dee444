/// Escapes `<` and `>` so injected markup is shown as text.
/// `&` and quotes are left alone.
pub fn html_encode(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

pub fn char_tail(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}
