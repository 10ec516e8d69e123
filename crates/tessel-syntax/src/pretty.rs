//! Tree dump.
//!
//! Renders a (possibly resolved) tree on one line, showing resolver
//! annotations where present:
//!
//! ```text
//! Branch(children=[Branch(id=1, children=[Leaf(token='defun'), ...])])
//! ```

use crate::ast::{Branch, Leaf, Node};
use std::fmt::{self, Write};

/// Writes `node` in dump form.
///
/// # Errors
///
/// Propagates formatter errors.
pub fn write_tree<W: Write>(out: &mut W, node: &Node<'_>) -> fmt::Result {
    match node {
        Node::Leaf(leaf) => write_leaf(out, leaf),
        Node::Branch(branch) => write_branch(out, branch),
    }
}

/// Returns the dump form of `node`.
#[must_use]
pub fn dump_tree(node: &Node<'_>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_tree(&mut out, node);
    out
}

fn write_leaf<W: Write>(out: &mut W, leaf: &Leaf<'_>) -> fmt::Result {
    match leaf.binding {
        Some(binding) => write!(out, "Leaf(token='{}', id={})", leaf.text(), binding.index()),
        None => write!(out, "Leaf(token='{}')", leaf.text()),
    }
}

/// Writes `branch` in dump form.
///
/// # Errors
///
/// Propagates formatter errors.
pub fn write_branch<W: Write>(out: &mut W, branch: &Branch<'_>) -> fmt::Result {
    out.write_str("Branch(")?;
    if let Some(id) = branch.id {
        write!(out, "id={id}, ")?;
    }
    out.write_str("children=[")?;
    for (idx, child) in branch.children.iter().enumerate() {
        if idx > 0 {
            out.write_str(", ")?;
        }
        write_tree(out, child)?;
    }
    out.write_str("])")
}
