/// Makes stored text safe to embed in generated markup.
pub trait Sanitizer {
    fn sanitize(&self, text: &str) -> String;

    /// Sanitize for use inside a double-quoted attribute value.
    fn sanitize_attribute(&self, text: &str) -> String {
        html_escape::encode_double_quoted_attribute(text).into_owned()
    }
}

/// Escapes every markup-significant character.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscape;

impl Sanitizer for HtmlEscape {
    fn sanitize(&self, text: &str) -> String {
        html_escape::encode_safe(text).into_owned()
    }
}
