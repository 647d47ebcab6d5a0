//! Summarize / translate requests against a hosted text-generation model.

mod gemini;
mod prompts;

pub use gemini::{GeminiClient, GeminiConfig};

use anyhow::Result;

/// Anything that turns (system instructions, input text) into generated text.
pub trait TextGenerator {
    fn generate(&self, instructions: &str, input: &str) -> Result<String>;
}

impl<G: TextGenerator + ?Sized> TextGenerator for &G {
    fn generate(&self, instructions: &str, input: &str) -> Result<String> {
        (**self).generate(instructions, input)
    }
}

impl<G: TextGenerator + ?Sized> TextGenerator for Box<G> {
    fn generate(&self, instructions: &str, input: &str) -> Result<String> {
        (**self).generate(instructions, input)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    Summarize,
    Translate,
}

impl Task {
    pub fn instructions(self) -> &'static str {
        match self {
            Task::Summarize => prompts::SUMMARIZER,
            Task::Translate => prompts::TRANSLATOR,
        }
    }

    /// User message wrapping the text to work on.
    pub fn request(self, text: &str) -> String {
        match self {
            Task::Summarize => format!("Summarize the following text: {text}"),
            Task::Translate => format!("Translate the following text: {text}"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Task::Summarize => "summary",
            Task::Translate => "translation",
        }
    }
}

pub struct Assistant<G> {
    generator: G,
}

impl<G: TextGenerator> Assistant<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn run(&self, task: Task, text: &str) -> Result<String> {
        tracing::info!(task = task.label(), chars = text.len(), "sending request");
        let out = self
            .generator
            .generate(task.instructions(), &task.request(text))
            .inspect_err(|e| tracing::error!(task = task.label(), error = %e, "generation failed"))?;
        tracing::info!(task = task.label(), chars = out.len(), "received response");
        Ok(out)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every call and answers with a canned prefix.
    #[derive(Default)]
    pub struct Recorder {
        pub calls: RefCell<Vec<(String, String)>>,
    }

    impl TextGenerator for Recorder {
        fn generate(&self, instructions: &str, input: &str) -> Result<String> {
            self.calls
                .borrow_mut()
                .push((instructions.to_string(), input.to_string()));
            Ok(format!("generated #{}", self.calls.borrow().len()))
        }
    }

    struct Failing;

    impl TextGenerator for Failing {
        fn generate(&self, _: &str, _: &str) -> Result<String> {
            anyhow::bail!("quota exceeded")
        }
    }

    #[test]
    fn test_dispatches_by_task() {
        let recorder = Recorder::default();
        let assistant = Assistant::new(&recorder);
        assistant.run(Task::Summarize, "Kant").unwrap();
        assistant.run(Task::Translate, "Ciao").unwrap();

        let calls = recorder.calls.borrow();
        assert_eq!(calls[0].0, prompts::SUMMARIZER);
        assert_eq!(calls[0].1, "Summarize the following text: Kant");
        assert_eq!(calls[1].0, prompts::TRANSLATOR);
        assert_eq!(calls[1].1, "Translate the following text: Ciao");
    }

    #[test]
    fn test_errors_propagate() {
        let assistant = Assistant::new(Failing);
        let err = assistant.run(Task::Summarize, "x").unwrap_err();
        assert!(err.to_string().contains("quota"));
    }

    #[test]
    fn test_prompts_carry_their_contracts() {
        assert!(Task::Summarize
            .instructions()
            .contains("## Summary of [Original Work/Concept] for Philosophical Study"));
        assert!(Task::Translate.instructions().contains("English to Italian"));
    }
}
