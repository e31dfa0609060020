//! Line parser for extension configuration resources.
//!
//! Each meaningful line is either `name = implementation` or a bare
//! `implementation`. Any line containing `#` is a comment and is ignored as a
//! whole.

/// How a blank line inside a resource is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlankLinePolicy {
    /// Blank lines are skipped and parsing continues.
    #[default]
    Skip,
    /// The first blank line ends the resource (legacy format).
    Terminate,
}

impl BlankLinePolicy {
    pub fn from_legacy(legacy: bool) -> Self {
        if legacy {
            BlankLinePolicy::Terminate
        } else {
            BlankLinePolicy::Skip
        }
    }
}

/// One `name = implementation` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionLine {
    /// 1-based line number within the resource.
    pub number: usize,
    /// Extension name, absent for bare identifiers.
    pub name: Option<String>,
    /// Implementation identifier.
    pub implementation: String,
    /// The trimmed source line.
    pub text: String,
}

/// Parse the text of one configuration resource.
pub fn parse_source(text: &str, blank_lines: BlankLinePolicy) -> Vec<ExtensionLine> {
    let mut lines = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            match blank_lines {
                BlankLinePolicy::Skip => continue,
                BlankLinePolicy::Terminate => break,
            }
        }
        if line.contains('#') {
            continue;
        }

        let (name, implementation) = match line.find('=') {
            Some(0) => (None, line[1..].trim()),
            Some(at) => (Some(line[..at].trim()), line[at + 1..].trim()),
            None => (None, line),
        };
        if implementation.is_empty() {
            continue;
        }

        lines.push(ExtensionLine {
            number: index + 1,
            name: name.map(String::from),
            implementation: implementation.to_string(),
            text: line.to_string(),
        });
    }

    lines
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
