//! Failure message templates.

use crate::primitives::display_value;
use serde_json::Value;

/// Placeholder token replaced by message arguments.
pub const PLACEHOLDER: &str = "{|}";

/// A message template split once on [`PLACEHOLDER`].
///
/// Rendering interleaves arguments between the split segments in order.
/// Placeholders without a matching argument render as nothing; surplus
/// arguments are ignored. A template without placeholders renders verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageTemplate {
    source: String,
    segments: Vec<String>,
}

impl MessageTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let segments = source.split(PLACEHOLDER).map(str::to_string).collect();
        MessageTemplate { source, segments }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of placeholder tokens in the template.
    pub fn placeholders(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    pub fn has_placeholder(&self) -> bool {
        self.placeholders() > 0
    }

    pub fn render(&self, args: &[Value]) -> String {
        if !self.has_placeholder() {
            return self.source.clone();
        }

        let last = self.segments.len() - 1;
        let mut out = String::with_capacity(self.source.len());
        for (i, segment) in self.segments.iter().enumerate() {
            out.push_str(segment);
            if i < last
                && let Some(arg) = args.get(i)
            {
                out.push_str(&display_value(arg));
            }
        }
        out
    }
}

impl From<&str> for MessageTemplate {
    fn from(source: &str) -> Self {
        MessageTemplate::new(source)
    }
}

impl From<String> for MessageTemplate {
    fn from(source: String) -> Self {
        MessageTemplate::new(source)
    }
}
