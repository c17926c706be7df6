use studybuddy_ai::Sanitizer;
use studybuddy_utils::strip_html;

/// Presentation sanitizer that drops embedded HTML tags.
///
/// Markdown rendering happens on the client; the server only guarantees
/// the text it hands over carries no markup.
#[derive(Clone, Copy, Debug, Default)]
pub struct TagStripSanitizer;

impl Sanitizer for TagStripSanitizer {
    fn sanitize(&self, raw: &str) -> String {
        strip_html(raw).trim().to_owned()
    }
}
