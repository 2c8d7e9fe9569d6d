//! Submit command implementation.
//!
//! Fills the submit form from flags and hands it to the store. On success
//! the new issue is printed; on failure nothing changes and the command fails.

use anyhow::{Result, bail};
use gorodplus_lib::present::{IssueCard, SubmitForm};

use crate::cli::SubmitArgs;
use crate::format::{SubmitOutput, format_card_details};
use crate::output::OutputContext;
use crate::session::Session;

impl From<&SubmitArgs> for SubmitForm {
    fn from(args: &SubmitArgs) -> Self {
        Self {
            title: args.title.clone(),
            description: args.description.clone(),
            location: args.location.clone(),
            category: args.category.clone().unwrap_or_default(),
        }
    }
}

/// Execute the submit command.
///
/// # Errors
///
/// Returns an error if a required field is empty or JSON serialization fails.
pub fn execute(args: &SubmitArgs, session: &mut Session, ctx: &OutputContext) -> Result<()> {
    let mut form = SubmitForm::from(args);
    let notification = form.submit(session.store_mut());
    let accepted = notification.is_success();

    let issue = accepted
        .then(|| session.store().snapshot().first().map(IssueCard::from))
        .flatten();

    if ctx.is_json() {
        ctx.json(&SubmitOutput {
            notification: notification.clone(),
            issue: issue.clone(),
        })?;
    } else {
        ctx.notify(&notification);
        if let Some(card) = &issue {
            print!("{}", format_card_details(card));
        }
    }

    if !accepted {
        bail!("submission rejected");
    }
    Ok(())
}
