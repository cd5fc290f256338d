//! HTML tokenizer.
//!
//! Splits markup into tags, text and comments. It never fails: malformed
//! constructs degrade to text or are skipped.

use crate::entities;

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    StartTag {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    Text(String),
    /// Text that must not be entity-decoded or escaped (script/style bodies).
    RawText(String),
    Comment(String),
}

pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    /// Set after a raw-text start tag; the next token is its body.
    raw_text_end: Option<String>,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            raw_text_end: None,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn raw_text(&mut self, name: &str) -> Option<Token> {
        let rest = self.rest();
        let closing = format!("</{name}");
        let end = find_ascii_case_insensitive(rest, &closing).unwrap_or(rest.len());
        self.pos += end;
        if end == 0 {
            None
        } else {
            Some(Token::RawText(rest[..end].to_string()))
        }
    }

    fn text(&mut self) -> Token {
        let rest = self.rest();
        // A '<' that does not open markup is literal text.
        let mut end = rest.len();
        let bytes = rest.as_bytes();
        let mut i = usize::from(bytes.first() == Some(&b'<'));
        while i < bytes.len() {
            if bytes[i] == b'<' && opens_markup(&rest[i..]) {
                end = i;
                break;
            }
            i += 1;
        }
        self.pos += end;
        Token::Text(entities::decode(&rest[..end]))
    }

    fn comment(&mut self) -> Token {
        let body_start = self.pos + 4;
        let rest = &self.input[body_start..];
        let (body, consumed) = match rest.find("-->") {
            Some(end) => (&rest[..end], end + 3),
            None => (rest, rest.len()),
        };
        self.pos = body_start + consumed;
        Token::Comment(body.to_string())
    }

    /// `<!DOCTYPE ...>`, `<?xml ...?>` and other declarations are dropped.
    fn skip_declaration(&mut self) {
        let rest = self.rest();
        self.pos += rest.find('>').map_or(rest.len(), |end| end + 1);
    }

    fn end_tag(&mut self) -> Token {
        let rest = &self.input[self.pos + 2..];
        let name_len = tag_name_len(rest);
        let name = rest[..name_len].to_ascii_lowercase();
        let after_name = &rest[name_len..];
        let consumed = after_name.find('>').map_or(after_name.len(), |end| end + 1);
        self.pos += 2 + name_len + consumed;
        Token::EndTag { name }
    }

    fn start_tag(&mut self) -> Token {
        let bytes = self.input.as_bytes();
        let mut i = self.pos + 1;
        let name_len = tag_name_len(&self.input[i..]);
        let name = self.input[i..i + name_len].to_ascii_lowercase();
        i += name_len;

        let mut attrs = Vec::new();
        let mut self_closing = false;
        loop {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= bytes.len() {
                break;
            }
            match bytes[i] {
                b'>' => {
                    i += 1;
                    break;
                }
                b'/' => {
                    i += 1;
                    if bytes.get(i) == Some(&b'>') {
                        self_closing = true;
                        i += 1;
                        break;
                    }
                }
                _ => {
                    let start = i;
                    while i < bytes.len()
                        && !bytes[i].is_ascii_whitespace()
                        && !matches!(bytes[i], b'=' | b'>' | b'/')
                    {
                        i += 1;
                    }
                    let attr_name = self.input[start..i].to_ascii_lowercase();
                    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    let mut value = String::new();
                    if bytes.get(i) == Some(&b'=') {
                        i += 1;
                        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                            i += 1;
                        }
                        match bytes.get(i) {
                            Some(&quote) if quote == b'"' || quote == b'\'' => {
                                let value_start = i + 1;
                                let value_end = self.input[value_start..]
                                    .find(char::from(quote))
                                    .map_or(bytes.len(), |end| value_start + end);
                                value = entities::decode(&self.input[value_start..value_end]);
                                i = (value_end + 1).min(bytes.len());
                            }
                            _ => {
                                let value_start = i;
                                while i < bytes.len()
                                    && !bytes[i].is_ascii_whitespace()
                                    && bytes[i] != b'>'
                                {
                                    i += 1;
                                }
                                value = entities::decode(&self.input[value_start..i]);
                            }
                        }
                    }
                    if !attr_name.is_empty() && !attrs.iter().any(|(n, _)| *n == attr_name) {
                        attrs.push((attr_name, value));
                    }
                }
            }
        }
        self.pos = i;

        if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            self.raw_text_end = Some(name.clone());
        }
        Token::StartTag {
            name,
            attrs,
            self_closing,
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(name) = self.raw_text_end.take() {
            if let Some(token) = self.raw_text(&name) {
                return Some(token);
            }
        }

        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }
        if !rest.starts_with('<') || !opens_markup(rest) {
            return Some(self.text());
        }
        if rest.starts_with("<!--") {
            return Some(self.comment());
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            self.skip_declaration();
            return self.next();
        }
        if rest.starts_with("</") {
            return Some(self.end_tag());
        }
        Some(self.start_tag())
    }
}

/// True when `s` (starting with `<`) begins a tag, comment or declaration.
fn opens_markup(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.get(1) {
        Some(b'!' | b'?') => true,
        Some(b'/') => bytes.get(2).is_some_and(u8::is_ascii_alphabetic),
        Some(c) => c.is_ascii_alphabetic(),
        None => false,
    }
}

fn tag_name_len(s: &str) -> usize {
    s.bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'_'))
        .count()
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Tokenizer::new(input).collect()
    }

    fn start(name: &str, attrs: &[(&str, &str)]) -> Token {
        Token::StartTag {
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            self_closing: false,
        }
    }

    #[test]
    fn test_tags_and_text() {
        assert_eq!(
            tokens("<TD class=\"x\" colspan=2>6,12</td>"),
            vec![
                start("td", &[("class", "x"), ("colspan", "2")]),
                Token::Text("6,12".into()),
                Token::EndTag { name: "td".into() },
            ]
        );
    }

    #[test]
    fn test_attribute_forms() {
        let toks = tokens("<a href='x>y' nowrap data-v = \"1 &amp; 2\">");
        assert_eq!(
            toks,
            vec![start("a", &[("href", "x>y"), ("nowrap", ""), ("data-v", "1 & 2")])]
        );
    }

    #[test]
    fn test_self_closing_and_declarations() {
        let toks = tokens("<!DOCTYPE html><br/><!-- note -->x");
        assert_eq!(
            toks,
            vec![
                Token::StartTag {
                    name: "br".into(),
                    attrs: vec![],
                    self_closing: true
                },
                Token::Comment(" note ".into()),
                Token::Text("x".into()),
            ]
        );
    }

    #[test]
    fn test_raw_text_is_not_tokenized() {
        let toks = tokens("<script>if (a < b) { x = '</td>'; }</SCRIPT><p>");
        assert_eq!(toks[1], Token::RawText("if (a < b) { x = '</td>'; }".into()));
        assert_eq!(toks[2], Token::EndTag { name: "script".into() });
        assert_eq!(toks[3], start("p", &[]));
    }

    #[test]
    fn test_literal_less_than_is_text() {
        assert_eq!(tokens("a < b"), vec![Token::Text("a < b".into())]);
        assert_eq!(tokens("<3"), vec![Token::Text("<3".into())]);
    }

    #[test]
    fn test_unterminated_input() {
        assert_eq!(tokens("<!-- open"), vec![Token::Comment(" open".into())]);
        assert_eq!(tokens("<td"), vec![start("td", &[])]);
    }
}
