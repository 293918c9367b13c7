//! Rules for turning a completion reply into subtask texts.
//!
//! # Invariants
//! - Blank lines (empty after trimming) never produce a subtask.
//! - Kept lines are used verbatim; only the line terminator is removed.
//! - Every subtask text ends with `(subtask of: <parent text>)`.
//! - There is no cap on the number of subtasks.

/// Upper bound on generated tokens sent with every completion request.
pub const SUBTASK_MAX_TOKENS: u32 = 150;
/// Sampling temperature sent with every completion request.
pub const SUBTASK_TEMPERATURE: f32 = 0.7;

/// Builds the completion prompt for one parent task.
pub fn build_prompt(parent_text: &str) -> String {
    format!("Break down this task into smaller subtasks: \"{parent_text}\"")
}

/// Splits a completion reply into non-blank lines.
///
/// Accepts both `\n` and `\r\n` line endings.
pub fn parse_subtask_lines(reply: &str) -> Vec<&str> {
    reply
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Formats the stored text of one subtask.
pub fn subtask_text(line: &str, parent_text: &str) -> String {
    format!("{line} (subtask of: {parent_text})")
}

/// Returns the texts of all subtasks derived from `reply`, in reply order.
pub fn plan_subtasks(parent_text: &str, reply: &str) -> Vec<String> {
    parse_subtask_lines(reply)
        .into_iter()
        .map(|line| subtask_text(line, parent_text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{build_prompt, parse_subtask_lines, plan_subtasks, subtask_text};

    #[test]
    fn prompt_quotes_the_parent_text() {
        assert_eq!(
            build_prompt("Buy eggs"),
            "Break down this task into smaller subtasks: \"Buy eggs\""
        );
    }

    #[test]
    fn blank_lines_are_dropped() {
        let lines = parse_subtask_lines("\n1. Go to store\n   \n\n2. Pick eggs\n\t\n");
        assert_eq!(lines, vec!["1. Go to store", "2. Pick eggs"]);
    }

    #[test]
    fn crlf_terminators_are_stripped_but_inner_spacing_is_kept() {
        let lines = parse_subtask_lines("  indented step\r\nlast step  ");
        assert_eq!(lines, vec!["  indented step", "last step  "]);
    }

    #[test]
    fn empty_reply_plans_nothing() {
        assert!(plan_subtasks("Buy eggs", "").is_empty());
        assert!(plan_subtasks("Buy eggs", "\n\n \n").is_empty());
    }

    #[test]
    fn every_planned_text_carries_the_parent_suffix() {
        let planned = plan_subtasks("Buy eggs", "Go to store\nPick eggs\nPay");
        assert_eq!(planned.len(), 3);
        assert_eq!(planned[0], "Go to store (subtask of: Buy eggs)");
        assert!(planned
            .iter()
            .all(|text| text.ends_with("(subtask of: Buy eggs)")));
    }

    #[test]
    fn subtask_text_does_not_touch_the_line() {
        assert_eq!(subtask_text("- a", "b"), "- a (subtask of: b)");
    }
}
