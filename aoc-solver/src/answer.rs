//! Puzzle answers and type-aware comparison

use serde::{Deserialize, Serialize};
use std::fmt;

/// The answer to one puzzle part
///
/// Answers are compared with [`Answer::matches`], which never treats a number
/// and a string as equal even when they print identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Number(i128),
    Text(String),
    List(Vec<Answer>),
}

/// Coarse kind of an answer, used for the type-consistency check on lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Number,
    Text,
    List,
}

impl Answer {
    pub fn kind(&self) -> AnswerKind {
        match self {
            Answer::Number(_) => AnswerKind::Number,
            Answer::Text(_) => AnswerKind::Text,
            Answer::List(_) => AnswerKind::List,
        }
    }

    /// Type-aware equality between an actual and an expected answer
    ///
    /// Scalars must be the same variant with equal values. Lists must have the
    /// same length, agree on the kind of their first element, and match
    /// element-wise.
    pub fn matches(&self, expected: &Answer) -> bool {
        match (self, expected) {
            (Answer::Number(a), Answer::Number(b)) => a == b,
            (Answer::Text(a), Answer::Text(b)) => a == b,
            (Answer::List(actual), Answer::List(expected)) => {
                if actual.len() != expected.len() {
                    return false;
                }
                if let (Some(a), Some(e)) = (actual.first(), expected.first())
                    && a.kind() != e.kind()
                {
                    return false;
                }
                actual.iter().zip(expected).all(|(a, e)| a.matches(e))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Number(n) => write!(f, "{n}"),
            Answer::Text(s) => f.write_str(s),
            Answer::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Answer {
                fn from(value: $t) -> Self {
                    Answer::Number(value as i128)
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, i64, i128, u8, u16, u32, u64, usize, isize);

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

impl From<char> for Answer {
    fn from(value: char) -> Self {
        Answer::Text(value.to_string())
    }
}

impl<T: Into<Answer>> From<Vec<T>> for Answer {
    fn from(values: Vec<T>) -> Self {
        Answer::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_never_equals_text() {
        assert!(!Answer::from(42).matches(&Answer::from("42")));
        assert!(!Answer::from("42").matches(&Answer::from(42)));
        assert!(Answer::from(42u64).matches(&Answer::from(42i32)));
    }

    #[test]
    fn test_list_length_mismatch() {
        let actual = Answer::from(vec!["a", "b"]);
        let expected = Answer::from(vec!["a"]);
        assert!(!actual.matches(&expected));
    }

    #[test]
    fn test_list_first_element_kind_mismatch() {
        let actual = Answer::from(vec![1, 2]);
        let expected = Answer::List(vec![Answer::from("1"), Answer::from(2)]);
        assert_eq!(actual.to_string(), expected.to_string());
        assert!(!actual.matches(&expected));
    }

    #[test]
    fn test_list_elementwise() {
        let actual = Answer::from(vec!["##..", "..##"]);
        assert!(actual.matches(&Answer::from(vec!["##..", "..##"])));
        assert!(!actual.matches(&Answer::from(vec!["##..", "..#."])));
    }

    #[test]
    fn test_display_list_one_per_line() {
        assert_eq!(Answer::from(vec!["ab", "cd"]).to_string(), "ab\ncd");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Answer::from(7)).unwrap();
        assert_eq!(json, r#"{"number":7}"#);
        let back: Answer = serde_json::from_str(r#"{"list":[{"text":"x"}]}"#).unwrap();
        assert_eq!(back, Answer::from(vec!["x"]));
    }
}
