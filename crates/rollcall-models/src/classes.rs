//! Classes and their rosters.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::enums::{Level, Stream};
use crate::ids::{ClassId, StudentId, TeacherId};

/// A class owned by one teacher.
///
/// `students` is the ordered roster of student ids; students themselves are
/// fetched separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub level: Level,
    pub stream: Stream,
    pub teacher_id: TeacherId,
    #[sqlx(rename = "student_ids")]
    pub students: Vec<StudentId>,
}

impl Class {
    pub fn is_owned_by(&self, teacher_id: TeacherId) -> bool {
        self.teacher_id == teacher_id
    }

    pub fn has_student(&self, student_id: StudentId) -> bool {
        self.students.contains(&student_id)
    }

    /// Roster position of a student, used to order student listings.
    pub fn roster_position(&self, student_id: StudentId) -> Option<usize> {
        self.students.iter().position(|id| *id == student_id)
    }
}

/// A class before its roster is populated.
#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub level: Level,
    pub stream: Stream,
    pub teacher_id: TeacherId,
}

impl NewClass {
    pub fn into_class(self) -> Class {
        Class {
            id: ClassId::new(),
            name: self.name,
            level: self.level,
            stream: self.stream,
            teacher_id: self.teacher_id,
            students: Vec::new(),
        }
    }
}
