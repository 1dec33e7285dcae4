//! Interactive selection
//!
//! Prompts are only shown in interactive invocations. The `Selector` trait is the prompt
//! capability; `TerminalSelector` drives a real terminal through dialoguer and
//! `ScriptedSelector` replays canned answers so resolution logic can be tested without one.

use crate::error::PagesError;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Prompt capability
pub trait Selector: Send + Sync {
    /// Present `items` and return the index the user picked, or `None` if they cancelled.
    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, PagesError>;

    /// Read a line of free text. When `default` is given it is offered and returned for an
    /// empty answer.
    fn prompt_text(&self, message: &str, default: Option<&str>) -> Result<String, PagesError>;
}

/// Pick one of `candidates` interactively.
///
/// Returns `None` without prompting when the invocation is not interactive or there is nothing
/// to choose from.
pub fn select_one<'c, T, F>(
    selector: &dyn Selector,
    prompt: &str,
    candidates: &'c [T],
    label: F,
    is_interactive: bool,
) -> Result<Option<&'c T>, PagesError>
where
    F: Fn(&T) -> String,
{
    if !is_interactive || candidates.is_empty() {
        return Ok(None);
    }
    let labels: Vec<String> = candidates.iter().map(label).collect();
    Ok(selector
        .select(prompt, &labels)?
        .and_then(|index| candidates.get(index)))
}

/// Ask for free text, treating an empty (or whitespace-only) answer as no answer.
pub fn prompt_text(
    selector: &dyn Selector,
    message: &str,
    default: Option<&str>,
) -> Result<Option<String>, PagesError> {
    let answer = selector.prompt_text(message, default)?;
    let answer = answer.trim();
    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(answer.to_string()))
    }
}

/// dialoguer-backed terminal prompts
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSelector;

impl TerminalSelector {
    pub fn new() -> Self {
        Self
    }
}

impl Selector for TerminalSelector {
    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, PagesError> {
        use dialoguer::Select;

        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(|e| PagesError::Prompt(format!("Failed to get user input: {}", e)))
    }

    fn prompt_text(&self, message: &str, default: Option<&str>) -> Result<String, PagesError> {
        use dialoguer::Input;

        let mut input = Input::<String>::new().with_prompt(message).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input
            .interact_text()
            .map_err(|e| PagesError::Prompt(format!("Failed to get user input: {}", e)))
    }
}

/// A prompt shown to a `ScriptedSelector`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRecord {
    Select { prompt: String, items: Vec<String> },
    Text { message: String, default: Option<String> },
}

#[derive(Debug, Default)]
struct Script {
    selections: VecDeque<Option<usize>>,
    answers: VecDeque<String>,
    prompts: Vec<PromptRecord>,
}

/// Selector that replays queued answers and records every prompt it is shown.
///
/// With nothing queued, selections are cancelled and text answers are empty, so the selector
/// behaves like a user who declines every prompt.
#[derive(Debug, Default)]
pub struct ScriptedSelector {
    script: Mutex<Script>,
}

impl ScriptedSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a selection by index (`None` cancels).
    pub fn with_selection(self, index: Option<usize>) -> Self {
        self.lock().selections.push_back(index);
        self
    }

    /// Queue a text answer; an empty string accepts the offered default.
    pub fn with_answer(self, answer: impl Into<String>) -> Self {
        self.lock().answers.push_back(answer.into());
        self
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> Vec<PromptRecord> {
        self.lock().prompts.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Selector for ScriptedSelector {
    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, PagesError> {
        let mut script = self.lock();
        script.prompts.push(PromptRecord::Select {
            prompt: prompt.to_string(),
            items: items.to_vec(),
        });
        Ok(script.selections.pop_front().flatten())
    }

    fn prompt_text(&self, message: &str, default: Option<&str>) -> Result<String, PagesError> {
        let mut script = self.lock();
        script.prompts.push(PromptRecord::Text {
            message: message.to_string(),
            default: default.map(str::to_string),
        });
        let answer = script.answers.pop_front().unwrap_or_default();
        if answer.is_empty() {
            Ok(default.unwrap_or_default().to_string())
        } else {
            Ok(answer)
        }
    }
}
