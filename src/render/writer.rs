//! Indent-aware string builder for HTML report markup.
//!
//! Output uses 2-space indentation; every element opens and closes on its
//! own line.

/// Indent-aware builder that tracks open elements so closing tags always
/// match.
pub struct MarkupWriter {
    buf: String,
    open: Vec<&'static str>,
}

impl MarkupWriter {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(4096),
            open: Vec::new(),
        }
    }

    /// Write a complete line at the current depth (appends newline).
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.open.len() {
            self.buf.push_str("  ");
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Write `<tag attrs>` and nest following lines inside it.
    pub fn open(&mut self, tag: &'static str, attrs: &str) {
        if attrs.is_empty() {
            self.line(&format!("<{}>", tag));
        } else {
            self.line(&format!("<{} {}>", tag, attrs));
        }
        self.open.push(tag);
    }

    /// Close the innermost open element. No-op when nothing is open.
    pub fn close(&mut self) {
        if let Some(tag) = self.open.pop() {
            self.line(&format!("</{}>", tag));
        }
    }

    /// Write `<tag attrs>text</tag>` on one line. `text` must already be escaped.
    pub fn element(&mut self, tag: &str, attrs: &str, text: &str) {
        if attrs.is_empty() {
            self.line(&format!("<{tag}>{text}</{tag}>"));
        } else {
            self.line(&format!("<{tag} {attrs}>{text}</{tag}>"));
        }
    }

    /// Close any elements still open and return the markup.
    pub fn finish(mut self) -> String {
        while !self.open.is_empty() {
            self.close();
        }
        self.buf
    }
}

impl Default for MarkupWriter {
    fn default() -> Self {
        Self::new()
    }
}
