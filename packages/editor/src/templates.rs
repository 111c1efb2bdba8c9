//! # Palette Templates
//!
//! Each palette entry materializes into a fresh node (or, for the column
//! layouts, a row container holding empty column containers). Every call
//! draws new ids, so any number of instances of one template can coexist.

use pagecraft_model::{styles, IdGenerator, Node, NodeKind, Styles};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Draggable palette entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Template {
    #[serde(rename = "heading")]
    Heading,
    #[serde(rename = "button")]
    Button,
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "container")]
    Container,
    #[serde(rename = "2-columns")]
    TwoColumns,
    #[serde(rename = "3-columns")]
    ThreeColumns,
}

impl Template {
    pub const ALL: [Template; 6] = [
        Template::Heading,
        Template::Button,
        Template::Paragraph,
        Template::Container,
        Template::TwoColumns,
        Template::ThreeColumns,
    ];

    /// Palette id, as emitted by drag events
    pub fn id(&self) -> &'static str {
        match self {
            Template::Heading => "heading",
            Template::Button => "button",
            Template::Paragraph => "paragraph",
            Template::Container => "container",
            Template::TwoColumns => "2-columns",
            Template::ThreeColumns => "3-columns",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Template::ALL.into_iter().find(|template| template.id() == id)
    }

    /// Human label shown in the palette
    pub fn label(&self) -> &'static str {
        match self {
            Template::Heading => "Heading",
            Template::Button => "Button",
            Template::Paragraph => "Paragraph",
            Template::Container => "Container",
            Template::TwoColumns => "2 Columns",
            Template::ThreeColumns => "3 Columns",
        }
    }

    /// Kind of the outermost node this template produces
    pub fn kind(&self) -> NodeKind {
        match self {
            Template::Heading => NodeKind::Heading,
            Template::Button => NodeKind::Button,
            Template::Paragraph => NodeKind::Paragraph,
            Template::Container | Template::TwoColumns | Template::ThreeColumns => {
                NodeKind::Container
            }
        }
    }

    pub fn column_count(&self) -> Option<usize> {
        match self {
            Template::TwoColumns => Some(2),
            Template::ThreeColumns => Some(3),
            _ => None,
        }
    }

    /// Build a fresh node for this template
    pub fn materialize(&self, ids: &mut dyn IdGenerator) -> Node {
        materialize(*self, ids)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Defaults shared by every leaf template
pub fn leaf_styles() -> Styles {
    styles([("fontSize", "16px"), ("margin", "10px"), ("padding", "10px")])
}

fn container_styles() -> Styles {
    styles([
        ("display", "flex"),
        ("flexDirection", "column"),
        ("margin", "10px"),
        ("padding", "20px"),
    ])
}

fn row_styles() -> Styles {
    styles([
        ("display", "flex"),
        ("flexDirection", "row"),
        ("margin", "10px"),
        ("padding", "10px"),
    ])
}

fn column_styles() -> Styles {
    styles([
        ("display", "flex"),
        ("flexDirection", "column"),
        ("flex", "1"),
        ("padding", "10px"),
    ])
}

/// Build a fresh node or subtree for `template`, drawing every id from `ids`
pub fn materialize(template: Template, ids: &mut dyn IdGenerator) -> Node {
    match template {
        Template::Heading | Template::Button | Template::Paragraph => {
            let kind = template.kind();
            Node {
                id: ids.next_id(),
                kind,
                content: format!("This is a {}", kind),
                styles: leaf_styles(),
                children: None,
            }
        }
        Template::Container => Node::container(ids.next_id(), "", container_styles(), Vec::new()),
        Template::TwoColumns | Template::ThreeColumns => {
            let row_id = ids.next_id();
            let count = template.column_count().unwrap_or(0);
            let columns = (0..count)
                .map(|_| Node::container(ids.next_id(), "", column_styles(), Vec::new()))
                .collect();
            Node::container(row_id, "", row_styles(), columns)
        }
    }
}
