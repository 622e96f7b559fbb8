//! Navigation between the three catalog views.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Entities,
    Properties,
    Links,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Entities => "Entities",
            View::Properties => "Properties",
            View::Links => "Links",
        }
    }

    pub fn all() -> &'static [View] {
        &[View::Entities, View::Properties, View::Links]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> View {
        let all = Self::all();
        let idx = self.index();
        all[if idx == 0 { all.len() - 1 } else { idx - 1 }]
    }
}
