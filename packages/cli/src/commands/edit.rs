use crate::project::Project;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{DropOutcome, EditSession, Placement, Template};
use pagecraft_model::CANVAS_ID;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Palette template (heading, button, paragraph, container, 2-columns, 3-columns)
    pub template: String,

    /// Container or sibling to drop onto
    #[arg(short, long, default_value = CANVAS_ID)]
    pub into: String,
}

#[derive(Debug, Args)]
pub struct DragArgs {
    /// Node to move
    pub source: String,

    /// Container, sibling or canvas to drop onto
    pub target: String,

    /// Land before the target sibling instead of after it
    #[arg(long)]
    pub before: bool,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Node to remove, with its subtree
    pub id: String,
}

#[derive(Debug, Args)]
pub struct SetContentArgs {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Args)]
pub struct SetStyleArgs {
    pub id: String,

    /// Style property, e.g. fontSize
    pub property: String,

    /// New value; omit to store an explicit null
    pub value: Option<String>,

    /// Remove the property instead
    #[arg(long, conflicts_with = "value")]
    pub unset: bool,
}

pub async fn add(args: AddArgs, cwd: &str) -> Result<()> {
    if Template::from_id(&args.template).is_none() {
        return Err(anyhow!(
            "Unknown template: {}. Run `pagecraft palette` for the list",
            args.template
        ));
    }

    let mut project = Project::open(cwd)?;
    let outcome = drag(&mut project.session, &args.template, &args.into, Placement::After);
    report_drop(&outcome);
    project.close().await
}

pub async fn move_node(args: DragArgs, cwd: &str) -> Result<()> {
    let placement = if args.before {
        Placement::Before
    } else {
        Placement::After
    };

    let mut project = Project::open(cwd)?;
    let outcome = drag(&mut project.session, &args.source, &args.target, placement);
    report_drop(&outcome);
    project.close().await
}

pub async fn remove(args: RemoveArgs, cwd: &str) -> Result<()> {
    let mut project = Project::open(cwd)?;
    let changed = project.session.delete(&args.id);
    report_edit(changed, &format!("Removed {}", args.id), &args.id);
    project.close().await
}

pub async fn set_content(args: SetContentArgs, cwd: &str) -> Result<()> {
    let mut project = Project::open(cwd)?;
    let changed = project.session.set_content(&args.id, &args.text);
    report_edit(changed, &format!("Updated content of {}", args.id), &args.id);
    project.close().await
}

pub async fn set_style(args: SetStyleArgs, cwd: &str) -> Result<()> {
    let mut project = Project::open(cwd)?;
    let session = &mut project.session;

    let (changed, message) = if args.unset {
        (
            session.clear_style(&args.id, &args.property),
            format!("Cleared {} on {}", args.property, args.id),
        )
    } else {
        let shown = args.value.as_deref().unwrap_or("null");
        (
            session.set_style(&args.id, &args.property, args.value.as_deref()),
            format!("Set {} = {} on {}", args.property, shown, args.id),
        )
    };

    report_edit(changed, &message, &args.id);
    project.close().await
}

/// Run one full drag gesture from `source` onto `target`
fn drag(session: &mut EditSession, source: &str, target: &str, placement: Placement) -> DropOutcome {
    session.drag_start(source);
    session.drag_over(source, Some(target), placement);
    session.drag_end(source, Some(target), placement)
}

fn report_drop(outcome: &DropOutcome) {
    match outcome {
        DropOutcome::Inserted { node_id, parent } => {
            println!("  {} Inserted {} into {}", "✓".green(), node_id.as_str().bright_white(), parent);
        }
        DropOutcome::Moved { node_id, parent } => {
            println!("  {} Moved {} into {}", "✓".green(), node_id.as_str().bright_white(), parent);
        }
        DropOutcome::Rejected(reason) => {
            println!("  {} No change: {}", "⚠️".yellow(), reason);
        }
    }
}

fn report_edit(changed: bool, message: &str, id: &str) {
    if changed {
        println!("  {} {}", "✓".green(), message);
    } else {
        println!("  {} No change: node {} not found", "⚠️".yellow(), id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_editor::{Document, SequentialIdGenerator};
    use pagecraft_workspace::{load_document, FileStore};
    use tempfile::TempDir;

    #[test]
    fn test_drag_gesture_nests_into_container() {
        let mut session = EditSession::new("t", Document::new())
            .with_id_generator(SequentialIdGenerator::new("t"));

        let DropOutcome::Inserted { node_id, .. } =
            drag(&mut session, "container", CANVAS_ID, Placement::After)
        else {
            panic!("expected an insert");
        };
        let outcome = drag(&mut session, "heading", node_id.as_str(), Placement::After);

        assert!(outcome.is_applied());
        assert_eq!(session.document().find(&node_id).unwrap().children().len(), 1);
        assert!(session.dragging_node_id().is_none());
    }

    #[tokio::test]
    async fn test_commands_persist_through_the_writer() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();

        add(
            AddArgs {
                template: "paragraph".to_string(),
                into: CANVAS_ID.to_string(),
            },
            &cwd,
        )
        .await
        .unwrap();

        let store = FileStore::new(dir.path().join("page.json"));
        let doc = load_document(&store);
        assert_eq!(doc.roots().len(), 1);
        let id = doc.roots()[0].to_string();

        set_content(
            SetContentArgs {
                id: id.clone(),
                text: "Hello".to_string(),
            },
            &cwd,
        )
        .await
        .unwrap();
        set_style(
            SetStyleArgs {
                id: id.clone(),
                property: "color".to_string(),
                value: None,
                unset: false,
            },
            &cwd,
        )
        .await
        .unwrap();

        let doc = load_document(&store);
        let node = doc.find(&id).unwrap();
        assert_eq!(node.content, "Hello");
        assert_eq!(node.styles.get("color"), Some(&None));

        remove(RemoveArgs { id }, &cwd).await.unwrap();
        assert!(load_document(&store).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_template_is_an_error() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();

        let result = add(
            AddArgs {
                template: "table".to_string(),
                into: CANVAS_ID.to_string(),
            },
            &cwd,
        )
        .await;
        assert!(result.is_err());
    }
}
