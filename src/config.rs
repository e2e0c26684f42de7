//! Parser configuration

/// Which top-level form a source text is parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceMode {
    /// Attribute name if the text (after leading ASCII whitespace) starts with
    /// `data-`, statements otherwise
    #[default]
    Auto,
    /// Always parse an attribute name (`data-on:click__once`)
    Attribute,
    /// Always parse expression statements (`$count++; @get('/x')`)
    Expression,
}

impl SourceMode {
    /// Resolve `Auto` against the text; the result is never `Auto`
    pub fn resolve(self, text: &str) -> SourceMode {
        match self {
            SourceMode::Auto => {
                // Same whitespace set the attribute scanner skips
                let rest = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
                if rest.starts_with("data-") {
                    SourceMode::Attribute
                } else {
                    SourceMode::Expression
                }
            }
            mode => mode,
        }
    }
}

/// Options for a [`Parser`](crate::parser::Parser)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// How to pick between attribute and statement parsing
    pub mode: SourceMode,
    /// Maximum number of nested syntax nodes before the rest of a construct
    /// is reported as a single error instead of being descended into
    pub max_nesting: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            mode: SourceMode::Auto,
            max_nesting: 256,
        }
    }
}

impl ParserConfig {
    /// Set the source mode
    pub fn with_mode(mut self, mode: SourceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the nesting limit
    pub fn with_max_nesting(mut self, max_nesting: u32) -> Self {
        self.max_nesting = max_nesting;
        self
    }
}
