//! Tree printer for the demonstration output.
//!
//! Renders each node by its kind name, quoting lexical kinds. A node whose
//! children are all leaves goes on one line, space-separated; as soon as
//! any child has children of its own, the children are laid out one per
//! line, indented two spaces per depth.

use crate::tree::{Tree, TreeKind};

/// Renders a tree into a string, without a trailing newline.
#[must_use]
pub fn print_tree(root: &Tree) -> String {
    let mut out = String::new();
    print_node(&mut out, 0, root);
    out
}

fn print_node(out: &mut String, indent: u32, tree: &Tree) {
    for _ in 0..indent {
        out.push_str("  ");
    }

    let children = tree.children();
    if !children.is_empty() {
        out.push('(');
    }

    let quoted = tree.kind() < TreeKind::Module;
    if quoted {
        out.push('"');
    }
    out.push_str(tree.kind().name());
    if quoted {
        out.push('"');
    }

    if children.iter().any(|child| child.arity() > 0) {
        for child in children {
            out.push('\n');
            print_node(out, indent + 1, child);
        }
    } else {
        for child in children {
            out.push(' ');
            print_node(out, 0, child);
        }
    }

    if !children.is_empty() {
        out.push(')');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyra_mem::Arena;

    #[test]
    fn leaf_renders_quoted_name() {
        let arena = Arena::new();

        let leaf = Tree::leaf(&arena, TreeKind::Plus, 1);
        assert_eq!(print_tree(leaf), "\"+\"");
    }

    #[test]
    fn structural_kinds_are_unquoted() {
        let arena = Arena::new();

        let name = Tree::leaf(&arena, TreeKind::Name, 1);
        let module = Tree::node(&arena, TreeKind::Module, 1, &[name]);
        assert_eq!(print_tree(module), "(module \"name\")");
    }

    #[test]
    fn flat_children_share_a_line() {
        let arena = Arena::new();

        let a = Tree::leaf(&arena, TreeKind::Number, 1);
        let op = Tree::leaf(&arena, TreeKind::Plus, 1);
        let b = Tree::leaf(&arena, TreeKind::Number, 1);
        let binary = Tree::node(&arena, TreeKind::BinaryExpr, 3, &[a, op, b]);

        assert_eq!(print_tree(binary), "(binary \"number\" \"+\" \"number\")");
    }

    #[test]
    fn nested_children_indent_per_level() {
        let arena = Arena::new();

        let a = Tree::leaf(&arena, TreeKind::Number, 1);
        let op = Tree::leaf(&arena, TreeKind::Star, 1);
        let b = Tree::leaf(&arena, TreeKind::Number, 1);
        let inner = Tree::node(&arena, TreeKind::BinaryExpr, 3, &[a, op, b]);
        let outer = Tree::node(&arena, TreeKind::Definition, 3, &[inner]);

        assert_eq!(print_tree(outer), "(definition\n  (binary \"number\" \"*\" \"number\"))");
    }

    #[test]
    fn synthesized_arrow_is_unquoted() {
        let arena = Arena::new();

        let arrow = Tree::leaf(&arena, TreeKind::Arrow, 2);
        let method = Tree::node(&arena, TreeKind::Method, 2, &[arrow]);
        assert_eq!(print_tree(method), "(method ->)");
    }
}
