use crate::utils::char_tail;
use std::fmt;

const HEADER_PREFIX: &str = "/header";
const ACTION_PREFIX: &str = "/act";
const LINK_PREFIX: &str = "/link";

/// Presentation style picked from the command prefix of a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Header,
    Action,
    Link,
    Default,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Header => "header",
            Style::Action => "action",
            Style::Link => "link",
            Style::Default => "default",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    pub html: String,
    pub style: Style,
}

/// Renders an already-sanitized message body written by `user`.
///
/// Prefixes are compared at fixed character offsets, so `/headerXYZ` still
/// takes the header branch. The character right after the prefix is always
/// skipped, whatever it is.
///
/// Link targets are embedded as-is; anything that is not an absolute
/// `http://` or `https://` URL renders as a broken link.
pub fn generate_html(text: &str, user: &str) -> FormattedMessage {
    if text.starts_with(HEADER_PREFIX) {
        FormattedMessage {
            html: format!(
                "</br><center class=\"{}\" style=\"font-size:1.5em;font-weight:bold;\">{}</center>",
                user,
                char_tail(text, HEADER_PREFIX.len() + 1)
            ),
            style: Style::Header,
        }
    } else if text.starts_with(ACTION_PREFIX) {
        FormattedMessage {
            html: format!(
                "<b>{}</b>: <strong>{}</strong>",
                user,
                char_tail(text, ACTION_PREFIX.len() + 1)
            ),
            style: Style::Action,
        }
    } else if text.starts_with(LINK_PREFIX) {
        let target = char_tail(text, LINK_PREFIX.len() + 1);
        FormattedMessage {
            html: format!(
                "<b>{}</b>: <a target=\"_blank\" href=\"{}\">{}</a>",
                user, target, target
            ),
            style: Style::Link,
        }
    } else {
        FormattedMessage {
            html: format!("<b>{}</b>: {}", user, text),
            style: Style::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        let msg = generate_html("/header Party!", "alice");
        assert_eq!(msg.style, Style::Header);
        assert_eq!(
            msg.html,
            "</br><center class=\"alice\" style=\"font-size:1.5em;font-weight:bold;\">Party!</center>"
        );
        assert!(!msg.html.contains("/header"));
    }

    #[test]
    fn test_header_without_space_drops_one_character() {
        let msg = generate_html("/headerXYZ", "alice");
        assert_eq!(msg.style, Style::Header);
        assert!(msg.html.contains(">YZ</center>"));
    }

    #[test]
    fn test_bare_header() {
        let msg = generate_html("/header", "alice");
        assert_eq!(msg.style, Style::Header);
        assert!(msg.html.ends_with("\"></center>"));
    }

    #[test]
    fn test_action() {
        let msg = generate_html("/act waves", "bob");
        assert_eq!(msg.style, Style::Action);
        assert_eq!(msg.html, "<b>bob</b>: <strong>waves</strong>");
    }

    #[test]
    fn test_link() {
        let msg = generate_html("/link http://x.com", "carol");
        assert_eq!(msg.style, Style::Link);
        assert_eq!(
            msg.html,
            "<b>carol</b>: <a target=\"_blank\" href=\"http://x.com\">http://x.com</a>"
        );
    }

    #[test]
    fn test_relative_link_is_not_validated() {
        let msg = generate_html("/link www.example.com", "carol");
        assert_eq!(msg.style, Style::Link);
        assert!(msg.html.contains("href=\"www.example.com\""));
    }

    #[test]
    fn test_default() {
        let msg = generate_html("hello", "dave");
        assert_eq!(msg.style, Style::Default);
        assert_eq!(msg.html, "<b>dave</b>: hello");
    }

    #[test]
    fn test_near_miss_prefixes_fall_back_to_default() {
        assert_eq!(generate_html("/ac waves", "bob").style, Style::Default);
        assert_eq!(generate_html("/lin x", "bob").style, Style::Default);
        assert_eq!(generate_html(" /act waves", "bob").style, Style::Default);
        assert_eq!(generate_html("", "bob").html, "<b>bob</b>: ");
    }

    #[test]
    fn test_priority_order() {
        // "/action" starts with "/act", so it never reaches the default branch.
        let msg = generate_html("/action jumps", "erin");
        assert_eq!(msg.style, Style::Action);
        assert_eq!(msg.html, "<b>erin</b>: <strong>on jumps</strong>");
    }

    #[test]
    fn test_multibyte_offsets_count_characters() {
        let msg = generate_html("/act héllo wörld", "zoë");
        assert_eq!(msg.html, "<b>zoë</b>: <strong>héllo wörld</strong>");
    }

    #[test]
    fn test_style_display() {
        assert_eq!(Style::Header.to_string(), "header");
        assert_eq!(Style::Action.to_string(), "action");
        assert_eq!(Style::Link.to_string(), "link");
        assert_eq!(Style::Default.to_string(), "default");
    }
}
