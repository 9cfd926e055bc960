use crate::domain::entities::session::Session;

/// Holds the identity loaded from the local profile at startup. There is no
/// fallback user: without a session the UI stays read-only and mutations are
/// rejected before any network call.
pub struct SessionService {
    current: Option<Session>,
}

impl SessionService {
    pub fn new(current: Option<Session>) -> Self {
        Self { current }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn label(&self) -> String {
        match &self.current {
            Some(session) => format!("已登入:{}", session.display_name),
            None => "未登入(唯讀)".to_string(),
        }
    }
}
