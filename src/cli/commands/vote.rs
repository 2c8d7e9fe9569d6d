//! Vote command implementation.
//!
//! Ids are processed in order. A rejected id does not stop the rest, but the
//! command fails if any vote was rejected.

use anyhow::{Result, bail};
use gorodplus_lib::Intent;

use crate::cli::VoteArgs;
use crate::format::{VoteOutput, VoteResult, format_votes};
use crate::output::OutputContext;
use crate::session::Session;

/// Execute the vote command.
///
/// # Errors
///
/// Returns an error if any id is unknown or JSON serialization fails.
pub fn execute(args: &VoteArgs, session: &mut Session, ctx: &OutputContext) -> Result<()> {
    let mut results = Vec::with_capacity(args.ids.len());

    for &id in &args.ids {
        let notification = session.dispatch(&Intent::Vote(id));
        let votes = notification
            .is_success()
            .then(|| session.store().get_issue(id).ok().map(|issue| issue.votes))
            .flatten();

        if !ctx.is_json() {
            ctx.notify(&notification);
            if let Some(votes) = votes {
                println!("  {id} {}", format_votes(votes));
            }
        }
        results.push(VoteResult {
            id,
            notification,
            votes,
        });
    }

    let output = VoteOutput { results };
    if ctx.is_json() {
        ctx.json(&output)?;
    }

    if !output.all_succeeded() {
        let rejected = output
            .results
            .iter()
            .filter(|r| !r.notification.is_success())
            .count();
        bail!("{rejected} of {} vote(s) rejected", output.results.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::output::OutputMode;
    use gorodplus_lib::{IssueId, IssueStore};

    #[test]
    fn test_vote_increments_in_order() {
        crate::logging::init_test_logging();
        let mut session = Session::new(IssueStore::seeded(), Config::default());
        let ctx = OutputContext::with_mode(OutputMode::Plain, 80);
        let args = VoteArgs {
            ids: vec![IssueId(4), IssueId(4), IssueId(1)],
        };

        execute(&args, &mut session, &ctx).unwrap();

        assert_eq!(session.store().get_issue(IssueId(4)).unwrap().votes, 47);
        assert_eq!(session.store().get_issue(IssueId(1)).unwrap().votes, 125);
    }

    #[test]
    fn test_unknown_id_fails_but_others_apply() {
        crate::logging::init_test_logging();
        let mut session = Session::new(IssueStore::seeded(), Config::default());
        let ctx = OutputContext::with_mode(OutputMode::Json, 80);
        let args = VoteArgs {
            ids: vec![IssueId(99), IssueId(2)],
        };

        let err = execute(&args, &mut session, &ctx).unwrap_err();

        assert_eq!(err.to_string(), "1 of 2 vote(s) rejected");
        assert_eq!(session.store().get_issue(IssueId(2)).unwrap().votes, 90);
    }
}
