//! Quiz question sources: the built-in deck and the plain-text import format.

use crate::types::Question;

/// Fallback question deck used when the host uploads no file.
pub fn builtin_deck() -> Vec<Question> {
    fn q(question: &str, options: &[&str], answer: &str) -> Question {
        Question {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
        }
    }

    vec![
        q(
            "What is the capital of France?",
            &["London", "Berlin", "Paris", "Madrid"],
            "Paris",
        ),
        q(
            "Which planet is known as the Red Planet?",
            &["Earth", "Mars", "Jupiter", "Venus"],
            "Mars",
        ),
        q(
            "What is the largest mammal in the world?",
            &["Elephant", "Blue Whale", "Giraffe", "Great White Shark"],
            "Blue Whale",
        ),
        q(
            "In which year did the Titanic sink?",
            &["1905", "1912", "1918", "1923"],
            "1912",
        ),
        q(
            "What is the chemical symbol for Gold?",
            &["Au", "Ag", "Go", "Gd"],
            "Au",
        ),
    ]
}

/// Parse the line-oriented quiz upload format.
///
/// A blank line terminates a question block. Within a block, `Q:` sets the
/// question text, `O:` appends one option and `A:` sets the correct answer.
/// A block is kept only if it has a question, an answer and at least one
/// option; incomplete blocks and unrecognized lines are dropped silently.
pub fn parse_quiz_text(input: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut block = BlockBuilder::default();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            block.flush_into(&mut questions);
            continue;
        }

        if let Some(text) = line.strip_prefix("Q:") {
            let text = text.trim();
            if !text.is_empty() {
                block.question = Some(text.to_string());
            }
        } else if let Some(text) = line.strip_prefix("O:") {
            let text = text.trim();
            if !text.is_empty() {
                block.options.push(text.to_string());
            }
        } else if let Some(text) = line.strip_prefix("A:") {
            let text = text.trim();
            if !text.is_empty() {
                block.answer = Some(text.to_string());
            }
        }
    }
    block.flush_into(&mut questions);

    questions
}

#[derive(Default)]
struct BlockBuilder {
    question: Option<String>,
    options: Vec<String>,
    answer: Option<String>,
}

impl BlockBuilder {
    /// Emit the block if complete, then reset for the next one.
    fn flush_into(&mut self, out: &mut Vec<Question>) {
        let block = std::mem::take(self);
        if let (Some(question), Some(answer)) = (block.question, block.answer) {
            if !block.options.is_empty() {
                out.push(Question {
                    question,
                    options: block.options,
                    answer,
                });
            }
        }
    }
}
