//! Fenced code block rendering as `<syntax-highlight>` elements.

use std::fmt::Write;

/// Info-string flag that turns a code block into a runnable demo.
const LIVE_FLAG: &str = "live";

/// Language used when a fence has no info string.
const DEFAULT_LANGUAGE: &str = "plaintext";

/// Map a fence language alias to a grammar name.
///
/// Unknown languages pass through lowercased.
///
/// # Examples
///
/// ```
/// use pob_markdown::map_language;
///
/// assert_eq!(map_language("ts"), "javascript");
/// assert_eq!(map_language("SVG"), "markup");
/// assert_eq!(map_language("Rust"), "rust");
/// ```
pub fn map_language(name: &str) -> String {
    let lower = name.to_lowercase();
    let mapped = match lower.as_str() {
        "js" | "ts" | "jsx" | "tsx" | "json" => "javascript",
        "html" | "xml" | "svg" => "markup",
        "scss" => "css",
        "py" => "python",
        "cs" => "csharp",
        "sh" | "shell" => "bash",
        _ => return lower,
    };
    mapped.to_owned()
}

/// Escape code content for element text.
pub fn escape_code(code: &str) -> String {
    let mut result = String::with_capacity(code.len());
    for c in code.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render a fenced code block.
///
/// Returns the grammar name and the markup. The first word of `info` is
/// the language; a `live` flag among the remaining words wraps the
/// element in `<pob-demo>`.
pub fn render_code_block(info: &str, code: &str) -> (String, String) {
    let mut words = info.split_whitespace();
    let language = map_language(words.next().unwrap_or(DEFAULT_LANGUAGE));
    let live = words.any(|w| w == LIVE_FLAG);

    let mut html = String::new();
    if live {
        html.push_str("<pob-demo>\n");
    }
    let _ = writeln!(
        html,
        r#"<syntax-highlight language="{}">{}</syntax-highlight>"#,
        escape_code(&language),
        escape_code(code)
    );
    if live {
        html.push_str("</pob-demo>\n");
    }

    (language, html)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_map_language_aliases() {
        assert_eq!(map_language("js"), "javascript");
        assert_eq!(map_language("json"), "javascript");
        assert_eq!(map_language("html"), "markup");
        assert_eq!(map_language("scss"), "css");
        assert_eq!(map_language("py"), "python");
        assert_eq!(map_language("cs"), "csharp");
        assert_eq!(map_language("shell"), "bash");
        assert_eq!(map_language("Python"), "python");
    }

    #[test]
    fn test_escape_code() {
        assert_eq!(
            escape_code(r#"console.log('hi') && "<b>""#),
            "console.log(&#039;hi&#039;) &amp;&amp; &quot;&lt;b&gt;&quot;"
        );
    }

    #[test]
    fn test_render_code_block() {
        let (language, html) = render_code_block("js", "console.log('hi');");
        assert_eq!(language, "javascript");
        assert_eq!(
            html,
            "<syntax-highlight language=\"javascript\">console.log(&#039;hi&#039;);</syntax-highlight>\n"
        );
    }

    #[test]
    fn test_render_live_code_block() {
        let (_, html) = render_code_block("js live", "alert('hi');");
        assert!(html.starts_with("<pob-demo>\n<syntax-highlight"));
        assert!(html.ends_with("</syntax-highlight>\n</pob-demo>\n"));
    }

    #[test]
    fn test_render_without_info() {
        let (language, html) = render_code_block("", "text");
        assert_eq!(language, "plaintext");
        assert!(html.contains(r#"language="plaintext""#));
    }
}
