//! The diagnostic the parser attaches to a [`Parse`](crate::parser::Parse)

use std::fmt;

use rowan::{TextRange, TextSize};

use super::codes::ErrorCode;
use super::context::ParseContext;

/// A secondary location for a diagnostic, such as where an unclosed
/// bracket was opened
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelatedInfo {
    pub message: String,
    pub range: TextRange,
}

impl RelatedInfo {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// A syntax error found while parsing
///
/// Every syntax error the parser reports also has an `ERROR` node in the
/// tree covering `range` (zero-width for missing tokens). Messages are built
/// from token kinds only, never from token text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
    pub code: ErrorCode,
    /// Suggested fix, shown after the message
    pub hint: Option<String>,
    pub related: Vec<RelatedInfo>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            range,
            code,
            hint: None,
            related: Vec::new(),
        }
    }

    /// A zero-width error at `offset`, for something missing
    pub fn at_offset(message: impl Into<String>, offset: TextSize, code: ErrorCode) -> Self {
        Self::new(message, TextRange::empty(offset), code)
    }

    /// "unexpected {found} {where}, expected {what}" for `context`
    ///
    /// `found` must describe the token kind, never its text.
    pub fn in_context(
        found: &str,
        context: ParseContext,
        range: TextRange,
        code: ErrorCode,
    ) -> Self {
        let message = format!(
            "unexpected {} {}, expected {}",
            found,
            context.description(),
            context.expected_description()
        );
        Self::new(message, range, code)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_related(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.related.push(RelatedInfo::new(message, range));
        self
    }

    /// Move every offset of this error through `map`
    pub(crate) fn map_offsets(&mut self, map: impl Fn(TextSize) -> TextSize) {
        self.range = TextRange::new(map(self.range.start()), map(self.range.end()));
        for info in &mut self.related {
            info.range = TextRange::new(map(info.range.start()), map(info.range.end()));
        }
    }

    /// `CODE: message`, followed by the hint on its own line
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {}", hint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    #[test]
    fn test_new_has_no_extras() {
        let err = SyntaxError::new("expected `)`", range(10, 11), ErrorCode::E0203);
        assert_eq!(err.message, "expected `)`");
        assert_eq!(err.code, ErrorCode::E0203);
        assert!(err.hint.is_none());
        assert!(err.related.is_empty());
    }

    #[test]
    fn test_at_offset_is_empty() {
        let err = SyntaxError::at_offset("missing", TextSize::new(42), ErrorCode::E0402);
        assert_eq!(err.range, TextRange::empty(TextSize::new(42)));
    }

    #[test]
    fn test_related_points_at_opener() {
        let err = SyntaxError::at_offset("expected `}`", TextSize::new(50), ErrorCode::E0202)
            .with_related("`{` opened here", range(10, 11));
        assert_eq!(err.related, vec![RelatedInfo::new("`{` opened here", range(10, 11))]);
    }

    #[test]
    fn test_display_with_hint() {
        let err = SyntaxError::new("cannot assign to literal", range(0, 1), ErrorCode::E0403)
            .with_hint("only signals and member expressions can be assigned to");
        assert_eq!(
            err.to_string(),
            "E0403: cannot assign to literal\n  hint: only signals and member expressions can be assigned to"
        );
        assert_eq!(err.format(), err.to_string());
    }

    #[test]
    fn test_in_context_message() {
        let err = SyntaxError::in_context(
            "`;`",
            ParseContext::Arguments,
            TextRange::empty(TextSize::new(3)),
            ErrorCode::E0405,
        );
        assert_eq!(
            err.message,
            "unexpected `;` in argument list, expected an argument"
        );
    }

    #[test]
    fn test_map_offsets() {
        let mut err = SyntaxError::new("x", range(4, 8), ErrorCode::E0901)
            .with_related("here", TextRange::empty(TextSize::new(2)));
        err.map_offsets(|o| if o >= TextSize::new(4) { o + TextSize::new(3) } else { o });
        assert_eq!(err.range, range(7, 11));
        assert_eq!(err.related[0].range, TextRange::empty(TextSize::new(2)));
    }
}
