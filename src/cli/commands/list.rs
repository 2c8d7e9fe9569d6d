//! List command implementation.
//!
//! Every issue as a card, newest submission first.

use anyhow::Result;
use gorodplus_lib::present::{IssueCard, list_view};

use crate::cli::StatusFilterArgs;
use crate::format::format_card_details;
use crate::output::{OutputContext, OutputMode};
use crate::session::Session;

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &StatusFilterArgs, session: &Session, ctx: &OutputContext) -> Result<()> {
    let cards = list_view(&args.apply(&session.store().snapshot()));

    match ctx.mode() {
        OutputMode::Json => ctx.json(&cards)?,
        OutputMode::Rich => render_list_rich(&cards, ctx),
        OutputMode::Plain => {
            if cards.is_empty() {
                println!("No issues found.");
            } else {
                for card in &cards {
                    print!("{}", format_card_details(card));
                }
                println!("\n{} issue(s)", cards.len());
            }
        }
    }

    Ok(())
}

fn render_list_rich(cards: &[IssueCard], ctx: &OutputContext) {
    use rich_rust::Text;
    use rich_rust::prelude::*;

    let console = Console::default();
    let theme = ctx.theme();

    if cards.is_empty() {
        let mut text = Text::new("");
        text.append_styled("No issues found.", theme.dimmed.clone());
        console.print_renderable(&text);
        return;
    }

    for card in cards {
        let mut content = Text::new("");
        content.append(&format!("{}\n", card.description));
        content.append_styled(card.badge.label, theme.status(&card.status));
        content.append_styled(&format!(" · {}", card.category), theme.accent.clone());
        content.append_styled(
            &format!(" · {} · {}", card.location, card.date),
            theme.dimmed.clone(),
        );
        content.append_styled(&format!("  \u{25b2} {}", card.votes), theme.emphasis.clone());
        if let Some(url) = &card.image_url {
            content.append_styled(&format!("\n{url}"), theme.dimmed.clone());
        }
        if let Some(note) = card.resolved_note {
            content.append_styled(&format!("\n\u{2713} {note}"), theme.success.clone());
        }

        let title = format!("{} {}", card.id, card.title);
        let panel = Panel::from_rich_text(&content, ctx.width())
            .title(Text::styled(&title, theme.panel_title.clone()));
        console.print_renderable(&panel);
    }

    let mut footer = Text::new("");
    footer.append_styled(&format!("{} issue(s)", cards.len()), theme.dimmed.clone());
    console.print_renderable(&footer);
}
