//! crates/lesson_plan_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These types are independent of any web framework or storage backend.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Error returned when a form value is not a member of its enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Declares a closed enumeration whose variants map one-to-one onto the
/// Portuguese labels shown in the form and printed in the plan.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in the order the form lists them.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label() == s)
                    .ok_or_else(|| ParseError::new($kind, s))
            }
        }
    };
}

labelled_enum!(
    /// School subject of the lesson.
    Subject, "subject" {
        History => "História",
        Geography => "Geografia",
        Portuguese => "Português",
        Mathematics => "Matemática",
        Biology => "Biologia",
        Physics => "Física",
        Chemistry => "Química",
        English => "Inglês",
        PhysicalEducation => "Educação Física",
    }
);

labelled_enum!(
    /// School year the lesson is taught to.
    Grade, "grade" {
        Seventh => "7ª Classe",
        Eighth => "8ª Classe",
        Ninth => "9ª Classe",
        Tenth => "10ª Classe",
        Eleventh => "11ª Classe",
        Twelfth => "12ª Classe",
    }
);

labelled_enum!(
    /// Pedagogical emphasis of a lesson.
    Focus, "focus" {
        Theoretical => "Teórica",
        Practical => "Prática/Experimental",
        Review => "Revisão",
        Assessment => "Avaliação",
        Introduction => "Introdução",
    }
);

impl Default for Focus {
    fn default() -> Self {
        Focus::Theoretical
    }
}

/// Length of a lesson. Only 45 and 90 minute lessons are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonDuration {
    Short,
    Long,
}

impl LessonDuration {
    pub const ALL: &'static [LessonDuration] = &[LessonDuration::Short, LessonDuration::Long];

    pub fn minutes(self) -> u32 {
        match self {
            LessonDuration::Short => 45,
            LessonDuration::Long => 90,
        }
    }

    /// Minutes given to each of the four didactic phases. Always sums to
    /// `minutes()`.
    pub fn time_slices(self) -> [u32; 4] {
        match self {
            LessonDuration::Long => [10, 40, 30, 10],
            LessonDuration::Short => [5, 20, 15, 5],
        }
    }
}

impl TryFrom<u32> for LessonDuration {
    type Error = ParseError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            45 => Ok(LessonDuration::Short),
            90 => Ok(LessonDuration::Long),
            other => Err(ParseError::new("duration", &other.to_string())),
        }
    }
}

impl FromStr for LessonDuration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let minutes = s
            .parse::<u32>()
            .map_err(|_| ParseError::new("duration", s))?;
        LessonDuration::try_from(minutes)
    }
}

impl fmt::Display for LessonDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.minutes())
    }
}

/// A validated request for one lesson plan.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub topic: String,
    pub subject: Subject,
    pub grade: Grade,
    pub duration: LessonDuration,
    pub focus: Focus,
}

// Only used internally for login/signup - contains sensitive data
#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

// Represents a browser login session (auth cookie)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
