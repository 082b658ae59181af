use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub class: String,
    pub email: String,
    pub phone: String,
}

/// Descriptive fields of a student as entered in the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentInput {
    pub name: String,
    pub class: String,
    pub email: String,
    pub phone: String,
}

impl StudentInput {
    /// Trimmed copy, or `None` if any of the four fields is blank.
    fn normalized(&self) -> Option<StudentInput> {
        let out = StudentInput {
            name: self.name.trim().to_string(),
            class: self.class.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        };
        if out.name.is_empty() || out.class.is_empty() || out.email.is_empty() || out.phone.is_empty()
        {
            return None;
        }
        Some(out)
    }
}

/// The roster. Students stay in insertion order.
#[derive(Debug, Default)]
pub struct Directory {
    students: Vec<Student>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn all(&self) -> &[Student] {
        &self.students
    }

    pub fn get(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn add(&mut self, input: &StudentInput) -> Option<&Student> {
        let fields = input.normalized()?;
        self.students.push(Student {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            class: fields.class,
            email: fields.email,
            phone: fields.phone,
        });
        self.students.last()
    }

    pub fn edit(&mut self, id: &str, input: &StudentInput) -> Option<&Student> {
        let fields = input.normalized()?;
        let student = self.students.iter_mut().find(|s| s.id == id)?;
        student.name = fields.name;
        student.class = fields.class;
        student.email = fields.email;
        student.phone = fields.phone;
        Some(student)
    }

    /// Drops the student from the roster. Cascades are the caller's job.
    pub(crate) fn remove(&mut self, id: &str) -> Option<Student> {
        let idx = self.students.iter().position(|s| s.id == id)?;
        Some(self.students.remove(idx))
    }

    /// Case-insensitive substring match on name, class or email. An empty
    /// query matches everyone.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Student> + 'a {
        let needle = query.to_lowercase();
        self.students.iter().filter(move |s| {
            s.name.to_lowercase().contains(&needle)
                || s.class.to_lowercase().contains(&needle)
                || s.email.to_lowercase().contains(&needle)
        })
    }

    /// Distinct class labels in first-seen order.
    pub fn classes(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();
        for s in &self.students {
            if seen.insert(s.class.as_str()) {
                out.push(s.class.clone());
            }
        }
        out
    }
}
