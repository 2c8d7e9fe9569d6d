//! Map command implementation.
//!
//! Prints the markers the map collaborator would draw, plus the viewport and
//! tile settings from configuration. Issues without coordinates are skipped.

use anyhow::Result;
use gorodplus_lib::present::{MapView, map_view};

use crate::cli::StatusFilterArgs;
use crate::format::format_marker_line;
use crate::output::{OutputContext, OutputMode};
use crate::session::Session;

/// Execute the map command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &StatusFilterArgs, session: &Session, ctx: &OutputContext) -> Result<()> {
    let snapshot = args.apply(&session.store().snapshot());
    let view = map_view(&snapshot, &session.config().map);

    match ctx.mode() {
        OutputMode::Json => ctx.json(&view)?,
        OutputMode::Rich => render_map_rich(&view, ctx),
        OutputMode::Plain => {
            let settings = &view.settings;
            println!(
                "center {:.4},{:.4} zoom {}",
                settings.center_lat, settings.center_lng, settings.zoom
            );
            println!("tiles {}", settings.tile_url);
            for marker in &view.markers {
                println!("{}", format_marker_line(marker));
            }
            println!("\n{} marker(s)", view.markers.len());
        }
    }

    Ok(())
}

fn render_map_rich(view: &MapView, ctx: &OutputContext) {
    use rich_rust::Text;
    use rich_rust::prelude::*;

    let console = Console::default();
    let theme = ctx.theme();
    let settings = &view.settings;

    let mut content = Text::new("");
    content.append_styled("Center  ", theme.accent.clone());
    content.append(&format!(
        "{:.4}, {:.4} (zoom {})\n",
        settings.center_lat, settings.center_lng, settings.zoom
    ));
    content.append_styled("Tiles   ", theme.accent.clone());
    content.append_styled(&format!("{}\n\n", settings.tile_url), theme.dimmed.clone());

    if view.markers.is_empty() {
        content.append_styled("No issues with coordinates.", theme.dimmed.clone());
    }

    let last_idx = view.markers.len().saturating_sub(1);
    for (idx, marker) in view.markers.iter().enumerate() {
        let prefix = if idx == last_idx {
            "└── "
        } else {
            "├── "
        };
        content.append_styled(prefix, theme.dimmed.clone());
        content.append_styled("\u{25cf} ", theme.status(&marker.status));
        content.append_styled(&format!("{:<4}", marker.id.to_string()), theme.emphasis.clone());
        content.append_styled(
            &format!("{:>8.4},{:<8.4} ", marker.lat, marker.lng),
            theme.dimmed.clone(),
        );
        content.append(&marker.popup.title);
        content.append_styled(
            &format!("  [{}] \u{25b2} {}", marker.popup.badge.label, marker.popup.votes),
            theme.dimmed.clone(),
        );
        if idx != last_idx {
            content.append("\n");
        }
    }

    let panel = Panel::from_rich_text(&content, ctx.width()).title(Text::styled(
        &format!("Map \u{00b7} {} marker(s)", view.markers.len()),
        theme.panel_title.clone(),
    ));
    console.print_renderable(&panel);
}
