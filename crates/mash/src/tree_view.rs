//! Static `--tree` output

use std::io::Write;

use crossterm::style::{Attribute, ContentStyle};
use mash_core::tree::NodeKind;
use mash_core::TreeNode;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::style::Styles;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "╰── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Lay the tree out one line per node
pub fn lines<'a>(root: &TreeNode<'a>, styles: &Styles) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(label(root, styles))];
    let count = root.children.len();
    for (i, child) in root.children.iter().enumerate() {
        push_node(child, "", i + 1 == count, styles, &mut lines);
    }
    lines
}

fn push_node<'a>(
    node: &TreeNode<'a>,
    prefix: &str,
    is_last: bool,
    styles: &Styles,
    lines: &mut Vec<Line<'a>>,
) {
    let branch = if is_last { LAST_BRANCH } else { BRANCH };
    lines.push(Line::from(vec![
        Span::styled(format!("{prefix}{branch}"), styles.enumerator),
        label(node, styles),
    ]));

    let child_prefix = format!("{prefix}{}", if is_last { SPACE } else { PIPE });
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        push_node(child, &child_prefix, i + 1 == count, styles, lines);
    }
}

fn label<'a>(node: &TreeNode<'a>, styles: &Styles) -> Span<'a> {
    match node.kind {
        NodeKind::Root => Span::styled(format!(" {} ", node.label), styles.root),
        NodeKind::Tag | NodeKind::Untagged => Span::styled(node.label, styles.tag),
        NodeKind::Item => Span::styled(node.label, styles.title),
        NodeKind::Description => Span::styled(node.label, styles.description),
    }
}

/// The whole tree as printable text, framed by blank lines
pub fn render(root: &TreeNode<'_>, styles: &Styles, ansi: bool) -> String {
    let mut out = String::from("\n");
    for line in lines(root, styles) {
        for span in &line.spans {
            if ansi {
                out.push_str(&content_style(span.style).apply(span.content.as_ref()).to_string());
            } else {
                out.push_str(&span.content);
            }
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Write the rendered tree to `out`; a closed or failing stream is a display error
pub fn print<W: Write>(
    out: &mut W,
    root: &TreeNode<'_>,
    styles: &Styles,
    ansi: bool,
) -> mash_core::Result<()> {
    out.write_all(render(root, styles, ansi).as_bytes())?;
    out.flush()?;
    Ok(())
}

fn content_style(style: Style) -> ContentStyle {
    let mut content = ContentStyle::new();
    content.foreground_color = style.fg.map(Into::into);
    content.background_color = style.bg.map(Into::into);

    for (modifier, attribute) in [
        (Modifier::BOLD, Attribute::Bold),
        (Modifier::DIM, Attribute::Dim),
        (Modifier::ITALIC, Attribute::Italic),
    ] {
        if style.add_modifier.contains(modifier) {
            content.attributes.set(attribute);
        }
    }
    content
}
