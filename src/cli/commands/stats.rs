//! Stats command implementation.
//!
//! Dashboard totals: all issues, in progress, resolved, and the share resolved.

use anyhow::Result;
use gorodplus_lib::Statistics;
use gorodplus_lib::present::summary_cards;

use crate::format::{StatsOutput, format_summary, pad_display};
use crate::output::{OutputContext, OutputMode};
use crate::session::Session;

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(session: &Session, ctx: &OutputContext) -> Result<()> {
    let stats = session.store().statistics();

    match ctx.mode() {
        OutputMode::Json => ctx.json(&StatsOutput::from(stats))?,
        OutputMode::Rich => render_stats_rich(&stats, ctx),
        OutputMode::Plain => {
            print!("{}", format_summary(&summary_cards(&stats)));
            if stats.other() > 0 {
                println!("({} issue(s) with an unrecognized status)", stats.other());
            }
        }
    }

    Ok(())
}

fn render_stats_rich(stats: &Statistics, ctx: &OutputContext) {
    use rich_rust::Text;
    use rich_rust::prelude::*;

    let console = Console::default();
    let theme = ctx.theme();
    let cards = summary_cards(stats);
    let width = cards
        .iter()
        .map(|card| unicode_width::UnicodeWidthStr::width(card.title))
        .max()
        .unwrap_or(0);

    let mut content = Text::new("");
    for (idx, card) in cards.iter().enumerate() {
        content.append_styled(&pad_display(card.title, width + 2), theme.accent.clone());
        let style = if idx == cards.len() - 1 {
            theme.success.clone()
        } else {
            theme.emphasis.clone()
        };
        content.append_styled(&card.value, style);
        if idx + 1 < cards.len() {
            content.append("\n");
        }
    }
    if stats.pending > 0 {
        content.append_styled(
            &format!("\n\n{} awaiting review", stats.pending),
            theme.dimmed.clone(),
        );
    }

    let panel = Panel::from_rich_text(&content, ctx.width())
        .title(Text::styled("Statistics", theme.panel_title.clone()));
    console.print_renderable(&panel);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use gorodplus_lib::IssueStore;

    #[test]
    fn test_stats_renders_in_every_mode() {
        crate::logging::init_test_logging();
        let session = Session::new(IssueStore::seeded(), Config::default());
        for mode in [OutputMode::Plain, OutputMode::Json] {
            assert!(execute(&session, &OutputContext::with_mode(mode, 80)).is_ok());
        }
    }
}
