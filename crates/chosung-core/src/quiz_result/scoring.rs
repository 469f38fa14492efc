//! Scoring rules.
//!
//! Answers are paired with questions by position. Pairing stops at the
//! shorter of the two lists: an unanswered question counts as wrong and
//! surplus answers are ignored. Nothing here panics on mismatched lengths.

use super::model::QuestionOutcome;
use crate::error::{ChosungError, Result};
use crate::quiz::Quiz;

/// Number of positions where the trimmed answer matches case-insensitively.
pub fn count_correct(quizzes: &[Quiz], answers: &[String]) -> usize {
    quizzes
        .iter()
        .zip(answers)
        .filter(|(quiz, answer)| quiz.is_answered_by(answer))
        .count()
}

/// Integer percentage, rounded down: `correct * 100 / total`.
///
/// Fails with a validation error when `total` is zero.
pub fn percentage(correct: usize, total: usize) -> Result<u8> {
    if total == 0 {
        return Err(ChosungError::validation("quiz group has no questions"));
    }
    let correct = correct.min(total);
    Ok((correct * 100 / total) as u8)
}

/// Scores `answers` against the canonical question list.
///
/// The denominator is always the number of questions.
pub fn score(quizzes: &[Quiz], answers: &[String]) -> Result<u8> {
    percentage(count_correct(quizzes, answers), quizzes.len())
}

/// Zips questions with answers into a per-question breakdown.
///
/// Output follows the question order and has `min(len)` entries.
pub fn assemble_outcomes(quizzes: &[Quiz], answers: &[String]) -> Vec<QuestionOutcome> {
    quizzes
        .iter()
        .zip(answers)
        .map(|(quiz, answer)| QuestionOutcome {
            quiz_id: quiz.id.clone(),
            chosung: quiz.chosung.clone(),
            correct_answer: quiz.answer.clone(),
            user_answer: answer.clone(),
            hint: quiz.hint.clone(),
            is_correct: quiz.is_answered_by(answer),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuizDraft;

    fn quizzes(answers: &[&str]) -> Vec<Quiz> {
        answers
            .iter()
            .map(|a| QuizDraft::new(*a, format!("hint for {}", a)).into_quiz().unwrap())
            .collect()
    }

    fn answers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_four_of_five_scores_eighty() {
        let qs = quizzes(&["Apple", "Banana", "Cherry", "Durian", "Elderberry"]);
        let given = answers(&["apple", "BANANA", "cherry", "durian", "fig"]);
        assert_eq!(count_correct(&qs, &given), 4);
        assert_eq!(score(&qs, &given).unwrap(), 80);
    }

    #[test]
    fn test_padded_answers_count_as_correct() {
        let qs = quizzes(&["사과", "Banana"]);
        let given = answers(&[" 사과", "banana  "]);
        assert_eq!(score(&qs, &given).unwrap(), 100);
        assert!(assemble_outcomes(&qs, &given).iter().all(|o| o.is_correct));
    }

    #[test]
    fn test_score_rounds_down() {
        let qs = quizzes(&["가", "나", "다"]);
        assert_eq!(score(&qs, &answers(&["가", "x", "x"])).unwrap(), 33);
        assert_eq!(score(&qs, &answers(&["가", "나", "x"])).unwrap(), 66);
        assert_eq!(score(&qs, &answers(&["가", "나", "다"])).unwrap(), 100);
    }

    #[test]
    fn test_empty_question_list_is_rejected() {
        let err = score(&[], &answers(&["a"])).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_short_answer_list_counts_missing_as_wrong() {
        let qs = quizzes(&["사과", "배", "감", "귤"]);
        assert_eq!(score(&qs, &answers(&["사과", "배"])).unwrap(), 50);
        assert_eq!(score(&qs, &[]).unwrap(), 0);
    }

    #[test]
    fn test_surplus_answers_are_ignored() {
        let qs = quizzes(&["사과"]);
        assert_eq!(score(&qs, &answers(&["사과", "사과", "사과"])).unwrap(), 100);
    }

    #[test]
    fn test_outcomes_follow_question_order_and_truncate() {
        let qs = quizzes(&["사과", "배", "감"]);
        let outcomes = assemble_outcomes(&qs, &answers(&["사과", "감"]));
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].quiz_id, qs[0].id);
        assert!(outcomes[0].is_correct);
        assert_eq!(outcomes[1].quiz_id, qs[1].id);
        assert_eq!(outcomes[1].correct_answer, "배");
        assert_eq!(outcomes[1].user_answer, "감");
        assert!(!outcomes[1].is_correct);
        assert_eq!(outcomes[1].hint, "hint for 배");
    }

    #[test]
    fn test_outcomes_with_surplus_answers() {
        let qs = quizzes(&["사과"]);
        let outcomes = assemble_outcomes(&qs, &answers(&["x", "y", "z"]));
        assert_eq!(outcomes.len(), 1);
    }
}
