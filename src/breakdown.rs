use std::fmt::{self, Display, Formatter};

/// Suffix of the ratio that counts the cache hits of a sector ratio.
pub const LOOKUP_HIT_SUFFIX: &str = "_lookup_hit";

/**
 * Node
 * One row group of a hierarchical traffic breakdown.
 *
 * A node with no addends of its own stands for the sum of its children:
 * the addends are resolved once, at construction, from the children that
 * were built before it. A node with neither addends nor children keeps an
 * empty addend list and renders as a zero row.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub label: String,
    pub addends: Vec<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(label: &str, addends: &[&str], children: Vec<Node>) -> Self {
        let mut addends: Vec<String> = addends.iter().map(|s| s.to_string()).collect();
        if addends.is_empty() {
            for child in &children {
                addends.extend(child.addends.iter().cloned());
            }
        }
        Node {
            label: label.to_string(),
            addends,
            children,
        }
    }

    pub fn leaf(label: &str, addend: &str) -> Self {
        Node::new(label, &[addend], Vec::new())
    }

    pub fn fmt_inner(&self, f: &mut Formatter, indent: usize) -> fmt::Result {
        write!(f, "{:indent$}new Node('{}', [", "", self.label, indent = indent * 2)?;
        for addend in &self.addends {
            write!(f, "'{}', ", addend)?;
        }
        if self.children.is_empty() {
            writeln!(f, "], []),")
        } else {
            writeln!(f, "], [")?;
            for child in &self.children {
                child.fmt_inner(f, indent + 1)?;
            }
            writeln!(f, "{:indent$}]),", "", indent = indent * 2)
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.fmt_inner(f, 0)
    }
}

struct Indented<'a>(&'a Node, usize);

impl Display for Indented<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0.fmt_inner(f, self.1)
    }
}

/// Emits the client-side `new Node(...)` literal of every root, each starting
/// at `base_indent` levels of two spaces.
pub fn to_javascript(nodes: &[Node], base_indent: usize) -> String {
    nodes
        .iter()
        .map(|n| Indented(n, base_indent).to_string())
        .collect()
}

/// Pre-order list of every addend in the forest. When `hit_suffix` is given,
/// each node's addends are followed by the same addends with the suffix.
pub fn required_metrics(nodes: &[Node], hit_suffix: Option<&str>) -> Vec<String> {
    let mut out = Vec::new();
    collect_required(nodes, hit_suffix, &mut out);
    out
}

fn collect_required(nodes: &[Node], hit_suffix: Option<&str>, out: &mut Vec<String>) {
    for node in nodes {
        out.extend(node.addends.iter().cloned());
        if let Some(suffix) = hit_suffix {
            out.extend(node.addends.iter().map(|a| format!("{a}{suffix}")));
        }
        collect_required(&node.children, hit_suffix, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Node> {
        vec![
            Node::new("LSU", &["lsu"], vec![
                Node::new("Global", &[], vec![
                    Node::leaf("Load", "g_ld"),
                    Node::leaf("Store", "g_st"),
                ]),
                Node::new("Local", &[], vec![Node::leaf("Load", "l_ld")]),
            ]),
            Node::new("TEX", &[], vec![
                Node::new("Texture", &[], vec![Node::leaf("Fetch", "t_tex"), Node::leaf("Load", "t_ld")]),
            ]),
        ]
    }

    #[test]
    fn test_empty_addends_resolve_from_children() {
        let nodes = sample();
        assert_eq!(nodes[0].addends, vec!["lsu"]);
        assert_eq!(nodes[0].children[0].addends, vec!["g_ld", "g_st"]);
        // Resolution is recursive down to the leaves.
        assert_eq!(nodes[1].addends, vec!["t_tex", "t_ld"]);
        assert_eq!(nodes[1].children[0].addends, vec!["t_tex", "t_ld"]);
    }

    #[test]
    fn test_resolved_addends_keep_duplicates() {
        let node = Node::new("Both", &[], vec![Node::leaf("A", "x"), Node::leaf("B", "x")]);
        assert_eq!(node.addends, vec!["x", "x"]);
    }

    #[test]
    fn test_empty_node_without_children() {
        let empty = Node::new("Empty", &[], Vec::new());
        assert!(empty.addends.is_empty());
        let parent = Node::new("Parent", &[], vec![empty]);
        assert!(parent.addends.is_empty());
        assert_eq!(to_javascript(&[parent], 0), "new Node('Parent', [], [\n  new Node('Empty', [], []),\n]),\n");
    }

    #[test]
    fn test_required_metrics_preorder() {
        let nodes = sample();
        assert_eq!(
            required_metrics(&nodes, None),
            vec![
                "lsu", "g_ld", "g_st", "g_ld", "g_st", "l_ld", "l_ld",
                "t_tex", "t_ld", "t_tex", "t_ld", "t_tex", "t_ld",
            ]
        );
    }

    #[test]
    fn test_required_metrics_with_hits() {
        let nodes = vec![Node::new("L2", &["a", "b"], vec![Node::leaf("Reads", "c")])];
        assert_eq!(
            required_metrics(&nodes, Some(LOOKUP_HIT_SUFFIX)),
            vec!["a", "b", "a_lookup_hit", "b_lookup_hit", "c", "c_lookup_hit"]
        );
    }

    #[test]
    fn test_to_javascript_shape() {
        let nodes = vec![Node::new("Global", &[], vec![Node::leaf("Global Load", "ld"), Node::leaf("Global Store", "st")])];
        let expected = concat!(
            "    new Node('Global', ['ld', 'st', ], [\n",
            "      new Node('Global Load', ['ld', ], []),\n",
            "      new Node('Global Store', ['st', ], []),\n",
            "    ]),\n",
        );
        assert_eq!(to_javascript(&nodes, 2), expected);
        assert_eq!(nodes[0].to_string(), to_javascript(&nodes, 0));
    }
}
