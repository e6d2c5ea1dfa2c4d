use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("markup pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Turns a fetched page into a single-line plain-text excerpt.
///
/// Every tag becomes a space so that adjacent cells and paragraphs do not
/// run together, then whitespace runs collapse to one space.
pub fn normalize(markup: &str) -> String {
    let stripped = MARKUP.replace_all(markup, " ");

    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_tag(text: &str) -> bool {
        match text.find('<') {
            Some(start) => text[start..].contains('>'),
            None => false,
        }
    }

    fn has_whitespace_run(text: &str) -> bool {
        text.chars()
            .zip(text.chars().skip(1))
            .any(|(a, b)| a.is_whitespace() && b.is_whitespace())
    }

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        let html = r#"
            <html><head><title>CVE-2024-3094</title></head>
            <body>
                <h1>xz  backdoor</h1>
                <p>Upgrade&nbsp;to <b>5.6.2</b>.</p>
            </body></html>
        "#;

        assert_eq!(
            normalize(html),
            "CVE-2024-3094 xz backdoor Upgrade&nbsp;to 5.6.2 ."
        );
    }

    #[test]
    fn tags_become_separators() {
        assert_eq!(normalize("<td>a</td><td>b</td>"), "a b");
    }

    #[test]
    fn empty_and_markup_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("<div><span></span></div>"), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn unbalanced_brackets_never_leave_a_tag() {
        let inputs = [
            "a < b",
            "a > b",
            "<<b>>x",
            "<a<b>c>",
            "1 < 2 and 3 > 2",
            "<unterminated",
            "\u{3000}<p>\u{00a0}全角\u{3000}\u{3000}テキスト</p>",
            "<script>if (a < b) { x = '>' }</script>done",
        ];

        for input in inputs {
            let output = normalize(input);
            assert!(!has_tag(&output), "{input:?} -> {output:?}");
            assert!(!has_whitespace_run(&output), "{input:?} -> {output:?}");
            assert_eq!(output, output.trim());
        }
    }

    #[test]
    fn is_deterministic() {
        let html = "<p>Fixed in   <a href='x'>1.2.3</a></p>";

        assert_eq!(normalize(html), normalize(html));
    }
}
