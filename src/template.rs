//! Generator command templates.
//!
//! A template is a shell command line in which `{name}` stands for the
//! project name, e.g. `npx @hilla/cli init --react {name}`. `{{` and `}}`
//! write literal braces. Any other placeholder is rejected, so a misspelled
//! template fails when the config is loaded rather than when it runs.

use thiserror::Error;

/// The one placeholder a command template may use.
pub const NAME_PLACEHOLDER: &str = "name";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder '{{{0}}}' (only {{name}} is supported)")]
    UnknownPlaceholder(String),

    #[error("'{{' at byte {0} is never closed")]
    Unclosed(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
}

/// A command line split into literal text and `{name}` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    segments: Vec<Segment>,
}

impl CommandTemplate {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut offset = 0;

        while let Some(found) = template[offset..].find(['{', '}']) {
            let at = offset + found;
            literal.push_str(&template[offset..at]);
            let tail = &template[at..];

            if tail.starts_with("{{") || tail.starts_with("}}") {
                literal.push_str(&tail[..1]);
                offset = at + 2;
            } else if tail.starts_with('}') {
                literal.push('}');
                offset = at + 1;
            } else {
                let close = tail.find('}').ok_or(TemplateError::Unclosed(at))?;
                let key = tail[1..close].trim();
                if key != NAME_PLACEHOLDER {
                    return Err(TemplateError::UnknownPlaceholder(key.to_string()));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Name);
                offset = at + close + 1;
            }
        }

        literal.push_str(&template[offset..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Substitute `name` into every slot. The caller quotes it for the shell.
    pub fn render(&self, name: &str) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Name => name,
            })
            .collect()
    }

    /// Whether the rendered command depends on the project name at all.
    pub fn uses_name(&self) -> bool {
        self.segments.contains(&Segment::Name)
    }
}
