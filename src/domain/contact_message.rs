use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct ContactMessage(String);

impl ContactMessage {
    pub fn parse(s: String) -> Result<ContactMessage, String> {
        let is_empty_or_whitespace = s.trim().is_empty();
        let is_too_long = s.graphemes(true).count() > 4096;

        if is_empty_or_whitespace {
            Err("Message is required".to_string())
        } else if is_too_long {
            Err("Message must be at most 4096 characters".to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
