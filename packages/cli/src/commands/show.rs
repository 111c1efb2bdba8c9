use crate::project::Project;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_common::{walk_node, walk_nodes, KindCounter, Visitor};
use pagecraft_model::Node;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Print the persisted JSON instead of the outline
    #[arg(long)]
    pub json: bool,
}

pub async fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let project = Project::open(cwd)?;
    let nodes = project.session.document().to_nodes();

    if args.json {
        let blob = project.session.document().to_blob()?;
        println!("{}", serde_json::to_string_pretty(&blob)?);
    } else if nodes.is_empty() {
        println!("{}", "Page is empty".dimmed());
    } else {
        for line in Outline::render(&nodes) {
            println!("{}", line);
        }
        let counts = KindCounter::count(&nodes);
        println!();
        println!(
            "{} nodes ({} containers, {} headings, {} paragraphs, {} buttons)",
            counts.total().to_string().bright_white(),
            counts.containers,
            counts.headings,
            counts.paragraphs,
            counts.buttons
        );
    }

    project.close().await
}

/// Indented one-line-per-node outline
#[derive(Debug, Default)]
struct Outline {
    lines: Vec<String>,
}

impl Outline {
    fn render(roots: &[Node]) -> Vec<String> {
        let mut outline = Self::default();
        walk_nodes(&mut outline, roots);
        outline.lines
    }
}

impl Visitor for Outline {
    fn visit_node(&mut self, node: &Node, depth: usize) {
        let mut line = format!("{}{} {}", "  ".repeat(depth), node.kind, node.id);
        if !node.content.is_empty() {
            line.push_str(&format!(" {:?}", node.content));
        }
        self.lines.push(line);
        walk_node(self, node, depth);
    }
}
