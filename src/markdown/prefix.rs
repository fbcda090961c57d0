use std::sync::LazyLock;

use regex::Regex;

static QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)>(\s?)(.*)$").expect("valid quote regex"));
static BULLET_EMPTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([-*+])\s*$").expect("valid bullet regex"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([-*+])\s+(.*)$").expect("valid bullet regex"));
static ORDERED_EMPTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([0-9]+)\.\s*$").expect("valid ordered regex"));
static ORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([0-9]+)\.\s+(.*)$").expect("valid ordered regex"));

/// Fence markers that get auto-closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fence {
    Backtick,
    Tilde,
}

impl Fence {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backtick => "```",
            Self::Tilde => "~~~",
        }
    }
}

/// Block prefix of a single line, first match wins in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePrefix<'a> {
    /// The line is exactly a fence marker.
    Fence(Fence),
    /// `>` with nothing but whitespace after it.
    EmptyQuote { indent: &'a str },
    Quote { indent: &'a str, content: &'a str },
    /// `-`, `*` or `+` with nothing but whitespace after it.
    EmptyBullet { indent: &'a str, bullet: char },
    Bullet {
        indent: &'a str,
        bullet: char,
        content: &'a str,
    },
    /// `N.` with nothing but whitespace after it.
    EmptyOrdered { indent: &'a str, digits: &'a str },
    Ordered {
        indent: &'a str,
        digits: &'a str,
        content: &'a str,
    },
    Plain,
}

impl<'a> LinePrefix<'a> {
    /// Leading whitespace before the marker, if the line has one.
    pub const fn indent(&self) -> Option<&'a str> {
        match *self {
            Self::EmptyQuote { indent }
            | Self::Quote { indent, .. }
            | Self::EmptyBullet { indent, .. }
            | Self::Bullet { indent, .. }
            | Self::EmptyOrdered { indent, .. }
            | Self::Ordered { indent, .. } => Some(indent),
            Self::Fence(_) | Self::Plain => None,
        }
    }

    /// A quote, bullet or ordered marker, with or without content.
    pub const fn has_marker(&self) -> bool {
        self.indent().is_some()
    }

    /// A marker with no content after it.
    pub const fn is_empty_marker(&self) -> bool {
        matches!(
            self,
            Self::EmptyQuote { .. } | Self::EmptyBullet { .. } | Self::EmptyOrdered { .. }
        )
    }

    /// Short name for log records.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Fence(_) => "fence",
            Self::EmptyQuote { .. } => "empty_quote",
            Self::Quote { .. } => "quote",
            Self::EmptyBullet { .. } => "empty_bullet",
            Self::Bullet { .. } => "bullet",
            Self::EmptyOrdered { .. } => "empty_ordered",
            Self::Ordered { .. } => "ordered",
            Self::Plain => "plain",
        }
    }
}

/// Classify `line` (without its trailing newline).
pub fn classify(line: &str) -> LinePrefix<'_> {
    match line {
        "```" => return LinePrefix::Fence(Fence::Backtick),
        "~~~" => return LinePrefix::Fence(Fence::Tilde),
        _ => {}
    }

    if let Some(caps) = QUOTE.captures(line) {
        let (Some(indent), Some(content)) = (caps.get(1), caps.get(3)) else {
            return LinePrefix::Plain;
        };
        let indent = indent.as_str();
        return if content.as_str().trim().is_empty() {
            LinePrefix::EmptyQuote { indent }
        } else {
            LinePrefix::Quote {
                indent,
                content: content.as_str(),
            }
        };
    }

    if let Some(caps) = BULLET_EMPTY.captures(line)
        && let (Some(indent), Some(bullet)) = (caps.get(1), marker_char(caps.get(2)))
    {
        return LinePrefix::EmptyBullet {
            indent: indent.as_str(),
            bullet,
        };
    }

    if let Some(caps) = BULLET.captures(line)
        && let (Some(indent), Some(bullet), Some(content)) =
            (caps.get(1), marker_char(caps.get(2)), caps.get(3))
    {
        let indent = indent.as_str();
        return if content.as_str().trim().is_empty() {
            LinePrefix::EmptyBullet { indent, bullet }
        } else {
            LinePrefix::Bullet {
                indent,
                bullet,
                content: content.as_str(),
            }
        };
    }

    if let Some(caps) = ORDERED_EMPTY.captures(line)
        && let (Some(indent), Some(digits)) = (caps.get(1), caps.get(2))
    {
        return LinePrefix::EmptyOrdered {
            indent: indent.as_str(),
            digits: digits.as_str(),
        };
    }

    if let Some(caps) = ORDERED.captures(line)
        && let (Some(indent), Some(digits), Some(content)) =
            (caps.get(1), caps.get(2), caps.get(3))
    {
        let indent = indent.as_str();
        let digits = digits.as_str();
        return if content.as_str().trim().is_empty() {
            LinePrefix::EmptyOrdered { indent, digits }
        } else {
            LinePrefix::Ordered {
                indent,
                digits,
                content: content.as_str(),
            }
        };
    }

    LinePrefix::Plain
}

fn marker_char(m: Option<regex::Match<'_>>) -> Option<char> {
    m.and_then(|m| m.as_str().chars().next())
}
