//! Sample data definitions.

use rollcall_models::{ClassId, Level, Stream, Student, StudentId};

pub const SAMPLE_PASSWORD: &str = "password123";

pub struct TeacherSeed {
    pub username: &'static str,
    pub full_name: &'static str,
    pub email: &'static str,
}

pub struct ClassSeed {
    pub name: &'static str,
    pub level: Level,
    pub stream: Stream,
    /// Username of the owning teacher in [`TEACHERS`].
    pub teacher: &'static str,
}

pub const TEACHERS: &[TeacherSeed] = &[
    TeacherSeed {
        username: "teacher1",
        full_name: "Sarah Johnson",
        email: "teacher1@school.com",
    },
    TeacherSeed {
        username: "teacher2",
        full_name: "Michael Smith",
        email: "teacher2@school.com",
    },
];

pub const CLASSES: &[ClassSeed] = &[
    ClassSeed {
        name: "Mathematics - Common Core",
        level: Level::CommonCore,
        stream: Stream::General,
        teacher: "teacher1",
    },
    ClassSeed {
        name: "Physics - 1st Baccalaureate Science",
        level: Level::FirstBaccalaureate,
        stream: Stream::Science,
        teacher: "teacher1",
    },
    ClassSeed {
        name: "Literature - 2nd Baccalaureate Arts",
        level: Level::SecondBaccalaureate,
        stream: Stream::Arts,
        teacher: "teacher2",
    },
];

pub const STUDENTS_PER_CLASS: usize = 25;

/// `Student {n} {first three characters of the level}`, numbered from 1.
pub fn generate_students(class_id: ClassId, level: Level, count: usize) -> Vec<Student> {
    let suffix: String = level.as_str().chars().take(3).collect();
    (1..=count)
        .map(|n| Student {
            id: StudentId::new(),
            full_name: format!("Student {} {}", n, suffix),
            class_id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_students_names() {
        let class_id = ClassId::new();
        let students = generate_students(class_id, Level::FirstBaccalaureate, 3);

        let names: Vec<&str> = students.iter().map(|s| s.full_name.as_str()).collect();
        assert_eq!(names, ["Student 1 1st", "Student 2 1st", "Student 3 1st"]);
        assert!(students.iter().all(|s| s.class_id == class_id));
    }

    #[test]
    fn test_every_class_has_a_known_teacher() {
        for class in CLASSES {
            assert!(TEACHERS.iter().any(|t| t.username == class.teacher));
        }
    }
}
