//! Multiple-choice trivia. One answer per mount; the first click locks every
//! option.

use crate::games::SessionToken;
use crate::routes::util::escape_html;

/// How an option button is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Unmarked,
    Correct,
    Wrong,
}

/// Result of clicking an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaOutcome {
    Correct,
    Wrong { answer: String },
    /// Already answered, or the index does not name an option.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trivia {
    question: String,
    options: Vec<String>,
    answer: String,
    chosen: Option<usize>,
}

impl Trivia {
    pub fn mount(question: &str, options: &[String], answer: &str) -> Self {
        Self {
            question: question.to_string(),
            options: options.to_vec(),
            answer: answer.to_string(),
            chosen: None,
        }
    }

    pub fn choose(&mut self, index: usize) -> TriviaOutcome {
        if self.chosen.is_some() || index >= self.options.len() {
            return TriviaOutcome::Ignored;
        }
        self.chosen = Some(index);
        if self.options[index] == self.answer {
            TriviaOutcome::Correct
        } else {
            TriviaOutcome::Wrong {
                answer: self.answer.clone(),
            }
        }
    }

    pub fn is_answered(&self) -> bool {
        self.chosen.is_some()
    }

    pub fn chosen(&self) -> Option<usize> {
        self.chosen
    }

    fn chose_correctly(&self) -> bool {
        self.chosen.is_some_and(|i| self.options[i] == self.answer)
    }

    /// Per-option marks in option order. After a wrong choice, every option
    /// whose label equals the answer is marked correct as well.
    pub fn marks(&self) -> Vec<OptionMark> {
        let Some(chosen) = self.chosen else {
            return vec![OptionMark::Unmarked; self.options.len()];
        };
        let correct = self.chose_correctly();
        self.options
            .iter()
            .enumerate()
            .map(|(i, opt)| {
                if i == chosen && correct {
                    OptionMark::Correct
                } else if i == chosen {
                    OptionMark::Wrong
                } else if !correct && *opt == self.answer {
                    OptionMark::Correct
                } else {
                    OptionMark::Unmarked
                }
            })
            .collect()
    }

    pub fn render(&self, token: SessionToken) -> String {
        let mut html = String::with_capacity(1024);
        html.push_str(&format!(
            r#"<div class="modal-text">{}</div>"#,
            escape_html(&self.question)
        ));

        html.push_str(r#"<div class="trivia-options">"#);
        for (i, (opt, mark)) in self.options.iter().zip(self.marks()).enumerate() {
            let class = match mark {
                OptionMark::Unmarked => "trivia-btn",
                OptionMark::Correct => "trivia-btn correct",
                OptionMark::Wrong => "trivia-btn wrong",
            };
            if self.is_answered() {
                html.push_str(&format!(
                    r#"<button class="{}" disabled>{}</button>"#,
                    class,
                    escape_html(opt)
                ));
            } else {
                html.push_str(&format!(
                    r##"<button class="{}" hx-post="/api/game/trivia" hx-vals='{{"session": "{}", "option": "{}"}}' hx-target="#game-slot" hx-swap="innerHTML">{}</button>"##,
                    class,
                    token,
                    i,
                    escape_html(opt)
                ));
            }
        }
        html.push_str(r#"</div>"#);

        if self.is_answered() {
            if self.chose_correctly() {
                html.push_str(r#"<div class="mt-4 text-green-600">Correct! 🎄</div>"#);
            } else {
                html.push_str(&format!(
                    r#"<div class="mt-4 text-red-600">Oops! The answer was {}</div>"#,
                    escape_html(&self.answer)
                ));
            }
        }
        html
    }
}
