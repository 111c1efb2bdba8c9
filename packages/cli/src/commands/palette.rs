use anyhow::Result;
use colored::Colorize;
use pagecraft_editor::Template;

/// List the draggable palette entries
pub fn palette() -> Result<()> {
    println!("{}", "🎨 Palette".bright_blue().bold());
    for template in Template::ALL {
        println!(
            "  {:<12} {}",
            template.id().bright_white(),
            template.label().dimmed()
        );
    }
    Ok(())
}
