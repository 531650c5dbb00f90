//! Colorized rendering of function signatures.

use colored::Color;
use ethernity_core::{FunctionNode, ParameterRecord, Result, StateMutability, Visibility};

const RESET: &str = "\x1b[0m";

/// Semantic color classes used in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `internal` / `private`
    Restricted,
    /// `public` / `external`
    Exposed,
    Pure,
    View,
    NonPayable,
    Payable,
    Name,
    Modifiers,
    Parent,
    Error,
}

impl Tag {
    pub fn color(self) -> Color {
        match self {
            Tag::Restricted => Color::Blue,
            Tag::Exposed => Color::Red,
            Tag::Pure => Color::Green,
            Tag::View => Color::Yellow,
            Tag::NonPayable => Color::Magenta,
            Tag::Payable => Color::BrightRed,
            Tag::Name => Color::Cyan,
            Tag::Modifiers => Color::BrightYellow,
            Tag::Parent => Color::BrightGreen,
            Tag::Error => Color::Red,
        }
    }

    pub fn for_visibility(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Internal | Visibility::Private => Tag::Restricted,
            Visibility::Public | Visibility::External => Tag::Exposed,
        }
    }

    pub fn for_mutability(mutability: StateMutability) -> Self {
        match mutability {
            StateMutability::Pure => Tag::Pure,
            StateMutability::View => Tag::View,
            StateMutability::NonPayable => Tag::NonPayable,
            StateMutability::Payable => Tag::Payable,
        }
    }
}

/// Turns tags into terminal escapes, or into nothing when color is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn ansi() -> Self {
        Self::new(true)
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Foreground escape for `tag`. Styling stays active until [`Palette::reset`].
    pub fn tag(&self, tag: Tag) -> String {
        if self.enabled {
            format!("\x1b[{}m", tag.color().to_fg_str())
        } else {
            String::new()
        }
    }

    pub fn reset(&self) -> &'static str {
        if self.enabled { RESET } else { "" }
    }
}

fn push_parameters(out: &mut String, params: &[ParameterRecord]) {
    for (idx, param) in params.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        out.push_str(param.type_string());
        if let Some(name) = param.declared_name() {
            out.push(' ');
            out.push_str(name);
        }
    }
}

/// Renders `node` as a single line under `display_name`.
///
/// Fails on a visibility or state mutability outside the known set.
pub fn format_function(
    node: &FunctionNode,
    display_name: &str,
    palette: Palette,
) -> Result<String> {
    let visibility = node.visibility()?;
    let mutability = node.state_mutability()?;

    let mut out = String::new();
    out.push_str(&palette.tag(Tag::for_visibility(visibility)));
    out.push_str(visibility.as_str());
    out.push(' ');
    out.push_str(&palette.tag(Tag::for_mutability(mutability)));
    out.push_str(mutability.as_str());
    out.push(' ');
    out.push_str(&palette.tag(Tag::Name));
    out.push_str(display_name);
    out.push_str(palette.reset());

    out.push('(');
    push_parameters(&mut out, &node.parameters.parameters);
    out.push(')');

    out.push_str(&palette.tag(Tag::Modifiers));
    for modifier in &node.modifiers {
        out.push(' ');
        out.push_str(modifier.name());
    }
    out.push_str(palette.reset());

    let returns = &node.return_parameters.parameters;
    if !returns.is_empty() {
        out.push_str(" returns(");
        push_parameters(&mut out, returns);
        out.push(')');
    }
    Ok(out)
}

/// Same as [`format_function`], prefixed with the declaring base contract.
pub fn format_inherited_function(
    parent: &str,
    node: &FunctionNode,
    display_name: &str,
    palette: Palette,
) -> Result<String> {
    let mut out = palette.tag(Tag::Parent);
    out.push_str(parent);
    out.push(' ');
    out.push_str(palette.reset());
    out.push_str(&format_function(node, display_name, palette)?);
    Ok(out)
}
