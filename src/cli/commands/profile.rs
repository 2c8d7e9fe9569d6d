//! Profile command implementation.

use anyhow::Result;
use gorodplus_lib::present::{ProfileEntry, profile_view};

use crate::cli::ProfileArgs;
use crate::format::format_profile_line;
use crate::output::{OutputContext, OutputMode};
use crate::session::Session;

/// Execute the profile command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &ProfileArgs, session: &Session, ctx: &OutputContext) -> Result<()> {
    let limit = args.limit.unwrap_or(session.config().profile_limit);
    let entries = profile_view(&session.store().snapshot(), limit);

    match ctx.mode() {
        OutputMode::Json => ctx.json(&entries)?,
        OutputMode::Rich => render_profile_rich(&entries, ctx),
        OutputMode::Plain => {
            for entry in &entries {
                println!("{}", format_profile_line(entry));
            }
        }
    }

    Ok(())
}

fn render_profile_rich(entries: &[ProfileEntry], ctx: &OutputContext) {
    use rich_rust::Text;
    use rich_rust::prelude::*;

    let console = Console::default();
    let theme = ctx.theme();

    let mut content = Text::new("");
    content.append_styled("My reports\n", theme.section.clone());
    for entry in entries {
        content.append_styled(&format!("{} ", entry.id), theme.emphasis.clone());
        content.append(&entry.title);
        content.append_styled(&format!(" · {} ", entry.location), theme.dimmed.clone());
        content.append_styled(&format!("{}\n", entry.badge.label), theme.status(&entry.status));
    }

    let panel = Panel::from_rich_text(&content, ctx.width())
        .title(Text::styled("Profile", theme.panel_title.clone()));
    console.print_renderable(&panel);
}
