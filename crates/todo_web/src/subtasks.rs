//! "Generate subtasks" fan-out.
//!
//! Asks the completion service to break a todo down, then inserts every
//! non-blank reply line as its own todo. Inserts run concurrently with no
//! ordering among them and no bound on their number. A failed insert is
//! logged and counted; its siblings are unaffected and nothing is rolled back.

use std::time::Instant;

use log::{debug, error, info, warn};
use serde::Serialize;
use tokio::task::JoinSet;
use todo_core::{build_prompt, plan_subtasks, Todo};

use crate::completion::{CompletionClient, CompletionError};
use crate::store::TodoStore;

/// Outcome counts of one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FanOutReport {
    /// Non-blank lines in the completion reply.
    pub requested: usize,
    pub created: usize,
    pub failed: usize,
}

/// Generates subtasks of `parent` and waits for every insert to settle.
///
/// # Errors
/// Only the completion round trip can fail the call; insert failures are
/// reported through `FanOutReport::failed`.
pub async fn generate_subtasks(
    store: &TodoStore,
    client: &dyn CompletionClient,
    parent: &Todo,
) -> Result<FanOutReport, CompletionError> {
    let started_at = Instant::now();
    info!(
        "event=subtasks_generate module=web status=start parent_id={}",
        parent.id
    );

    let prompt = build_prompt(&parent.text);
    let reply = match client.complete(&prompt).await {
        Ok(reply) => reply,
        Err(err) => {
            error!(
                "event=subtasks_generate module=web status=error parent_id={} duration_ms={} error={}",
                parent.id,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }
    };

    let texts = plan_subtasks(&parent.text, &reply);
    let mut report = FanOutReport {
        requested: texts.len(),
        ..FanOutReport::default()
    };

    let mut inserts = JoinSet::new();
    for text in texts {
        let store = store.clone();
        inserts.spawn(async move { store.create(text).await });
    }

    while let Some(joined) = inserts.join_next().await {
        match joined {
            Ok(Ok(todo)) => {
                report.created += 1;
                debug!(
                    "event=subtask_insert module=web status=ok parent_id={} id={}",
                    parent.id, todo.id
                );
            }
            Ok(Err(err)) => {
                report.failed += 1;
                warn!(
                    "event=subtask_insert module=web status=error parent_id={} error={}",
                    parent.id, err
                );
            }
            Err(err) => {
                report.failed += 1;
                warn!(
                    "event=subtask_insert module=web status=error parent_id={} error=join:{}",
                    parent.id, err
                );
            }
        }
    }

    info!(
        "event=subtasks_generate module=web status=ok parent_id={} requested={} created={} failed={} duration_ms={}",
        parent.id,
        report.requested,
        report.created,
        report.failed,
        started_at.elapsed().as_millis()
    );

    Ok(report)
}
