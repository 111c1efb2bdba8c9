use pagecraft_model::{Node, NodeId, NodeKind};

/// Visitor pattern for traversing node trees immutably
///
/// The default implementation walks the whole tree in pre-order.
/// Override `visit_node` to act on each node and call `walk_node` to keep
/// descending.
pub trait Visitor: Sized {
    fn visit_node(&mut self, node: &Node, depth: usize) {
        walk_node(self, node, depth);
    }
}

/// Visit every root of a document at depth 0
pub fn walk_nodes<V: Visitor>(visitor: &mut V, roots: &[Node]) {
    for node in roots {
        visitor.visit_node(node, 0);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node, depth: usize) {
    for child in node.children() {
        visitor.visit_node(child, depth + 1);
    }
}

/// Collects every id in pre-order
#[derive(Debug, Default)]
pub struct IdCollector {
    pub ids: Vec<NodeId>,
}

impl IdCollector {
    pub fn collect(roots: &[Node]) -> Vec<NodeId> {
        let mut collector = Self::default();
        walk_nodes(&mut collector, roots);
        collector.ids
    }
}

impl Visitor for IdCollector {
    fn visit_node(&mut self, node: &Node, depth: usize) {
        self.ids.push(node.id.clone());
        walk_node(self, node, depth);
    }
}

/// Counts nodes per kind
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KindCounter {
    pub headings: usize,
    pub buttons: usize,
    pub paragraphs: usize,
    pub containers: usize,
}

impl KindCounter {
    pub fn count(roots: &[Node]) -> Self {
        let mut counter = Self::default();
        walk_nodes(&mut counter, roots);
        counter
    }

    pub fn total(&self) -> usize {
        self.headings + self.buttons + self.paragraphs + self.containers
    }
}

impl Visitor for KindCounter {
    fn visit_node(&mut self, node: &Node, depth: usize) {
        match node.kind {
            NodeKind::Heading => self.headings += 1,
            NodeKind::Button => self.buttons += 1,
            NodeKind::Paragraph => self.paragraphs += 1,
            NodeKind::Container => self.containers += 1,
        }
        walk_node(self, node, depth);
    }
}
