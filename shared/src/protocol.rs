use crate::{CheckPatch, Habit, HabitPatch, Id, NewHabit};
use serde::{Serialize, de::DeserializeOwned, de::IgnoredAny};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Paths are relative to the habit API base URL. Habit paths keep the
/// trailing slash the collection endpoint expects.
pub trait ApiRequest {
    /// The JSON body sent with the request.
    type Body: Serialize;
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path (or suffix).
    fn path(&self) -> String;

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

pub const HABITS_PATH: &str = "/habits/";

fn habit_path(id: &Id) -> String {
    format!("{}{}/", HABITS_PATH, id)
}

// =========================================================
// Request Definitions
// =========================================================

/// List all habits of the session
#[derive(Debug)]
pub struct ListHabitsRequest;

impl ApiRequest for ListHabitsRequest {
    type Body = ();
    type Response = Vec<Habit>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        HABITS_PATH.to_string()
    }
}

/// Create a habit; the server assigns the id
impl ApiRequest for NewHabit {
    type Body = NewHabit;
    type Response = Habit;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        HABITS_PATH.to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }
}

/// Partial update of a single habit
#[derive(Debug)]
pub struct UpdateHabitRequest<P> {
    pub id: Id,
    pub patch: P,
}

impl ApiRequest for UpdateHabitRequest<HabitPatch> {
    type Body = HabitPatch;
    type Response = Habit;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        habit_path(&self.id)
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.patch)
    }
}

impl ApiRequest for UpdateHabitRequest<CheckPatch> {
    type Body = CheckPatch;
    type Response = Habit;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        habit_path(&self.id)
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.patch)
    }
}

/// Delete a habit
///
/// Any 2xx counts as success: the body (empty, `{}`, or the deleted record) is ignored.
#[derive(Debug)]
pub struct DeleteHabitRequest {
    pub id: Id,
}

impl ApiRequest for DeleteHabitRequest {
    type Body = ();
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        habit_path(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_habit_paths_keep_trailing_slash() {
        assert_eq!(ListHabitsRequest.path(), "/habits/");
        let req = DeleteHabitRequest { id: Id::Number(12) };
        assert_eq!(req.path(), "/habits/12/");
        let req = DeleteHabitRequest { id: Id::from("a-b") };
        assert_eq!(req.path(), "/habits/a-b/");
    }
}
