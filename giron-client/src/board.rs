use std::{cmp::Reverse, sync::Arc};

use crate::api::{Answer, Question, QuestionId};

/// One delivery from the subscription manager. The view model mutates only
/// through `Board::apply`, so a UI runtime can treat every message as
/// "apply, then re-render".
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BoardMsg {
    /// Full refresh of the question list
    Questions(Vec<Question>),
    /// This question is now the single expanded one
    Expanded(QuestionId),
    /// Full refresh of the expanded question's answer list
    Answers(QuestionId, Vec<Answer>),
    /// The question was collapsed; its answer list leaves the view model
    /// (the store keeps the answers, re-expanding re-fetches them)
    Collapsed(QuestionId),
}

/// In-memory projection of the board: the question list plus, when one
/// question is expanded, its answer list. Answers are kept out of the
/// question entries so a root-list refresh never discards them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    /// Newest first
    pub questions: Vec<Arc<Question>>,

    /// At most one question is expanded at a time
    pub expanded: Option<QuestionId>,

    /// Answers of the expanded question, oldest first
    pub answers: Vec<Arc<Answer>>,
}

impl Board {
    pub fn stub() -> Board {
        Board {
            questions: Vec::new(),
            expanded: None,
            answers: Vec::new(),
        }
    }

    pub fn apply(&mut self, msg: BoardMsg) {
        match msg {
            BoardMsg::Questions(mut questions) => {
                // Order here rather than trusting the store's delivery order;
                // ties break on id so refreshes are deterministic
                questions.sort_unstable_by_key(|q| (Reverse(q.created_at), q.id));
                self.questions = questions.into_iter().map(Arc::new).collect();
            }
            BoardMsg::Expanded(id) => {
                self.expanded = Some(id);
                self.answers.clear();
            }
            BoardMsg::Answers(id, mut answers) => {
                if self.expanded != Some(id) {
                    tracing::warn!(?id, "dropping answer delivery for a non-expanded question");
                    return;
                }
                answers.sort_unstable_by_key(|a| (a.created_at, a.id));
                self.answers = answers.into_iter().map(Arc::new).collect();
            }
            BoardMsg::Collapsed(id) => {
                if self.expanded == Some(id) {
                    self.expanded = None;
                    self.answers.clear();
                }
            }
        }
    }

    /// The answer list, available only for the expanded question
    pub fn answers_for(&self, question: QuestionId) -> Option<&[Arc<Answer>]> {
        (self.expanded == Some(question)).then(|| &self.answers[..])
    }

    pub fn is_expanded(&self, question: QuestionId) -> bool {
        self.expanded == Some(question)
    }
}
