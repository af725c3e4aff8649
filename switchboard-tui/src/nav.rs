//! Navigation and view switching utilities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    ApiKeys,
    Channels,
    Users,
    UsageLogs,
    RequestTraces,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::ApiKeys => "API Keys",
            View::Channels => "Channels",
            View::Users => "Users",
            View::UsageLogs => "Usage",
            View::RequestTraces => "Traces",
        }
    }

    pub fn all() -> &'static [View] {
        &[
            View::ApiKeys,
            View::Channels,
            View::Users,
            View::UsageLogs,
            View::RequestTraces,
        ]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let idx = self.index();
        let all = Self::all();
        all[(idx + 1) % all.len()]
    }

    pub fn previous(&self) -> View {
        let idx = self.index();
        let all = Self::all();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}
