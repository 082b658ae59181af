/// Gate in front of destructive operations. Returning `false` abandons the
/// operation with no state change.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub const DELETE_STUDENT_PROMPT: &str = "Are you sure you want to delete this student?";
pub const DELETE_EXAM_PROMPT: &str = "Are you sure you want to delete this exam result?";
