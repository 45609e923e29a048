use std::fmt::Display;

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Status,
    CommitAndSync,
    Pull,
    Push,
    Branches,
    Merge,
    Remotes,
    Exit,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Status,
        Action::CommitAndSync,
        Action::Pull,
        Action::Push,
        Action::Branches,
        Action::Merge,
        Action::Remotes,
        Action::Exit,
    ];

    /// Menu labels, index-aligned with [`Action::ALL`].
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(ToString::to_string).collect()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status => f.write_str("Status"),
            Self::CommitAndSync => f.write_str("Commit & sync"),
            Self::Pull => f.write_str("Pull"),
            Self::Push => f.write_str("Push"),
            Self::Branches => f.write_str("Switch branch"),
            Self::Merge => f.write_str("Merge branch"),
            Self::Remotes => f.write_str("Manage remotes"),
            Self::Exit => f.write_str("Exit"),
        }
    }
}

/// Entries of the remote management sub-menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteAction {
    Add,
    UpdateUrl,
    Delete,
    Back,
}

impl RemoteAction {
    pub const ALL: [RemoteAction; 4] = [
        RemoteAction::Add,
        RemoteAction::UpdateUrl,
        RemoteAction::Delete,
        RemoteAction::Back,
    ];

    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(ToString::to_string).collect()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl Display for RemoteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => f.write_str("Add remote"),
            Self::UpdateUrl => f.write_str("Update remote URL"),
            Self::Delete => f.write_str("Delete remote"),
            Self::Back => f.write_str("Back"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_menu_order() {
        let labels = Action::labels();
        assert_eq!(labels.len(), Action::ALL.len());
        assert_eq!(labels[0], "Status");
        assert_eq!(labels.last().map(String::as_str), Some("Exit"));
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Action::from_index(1), Some(Action::CommitAndSync));
        assert_eq!(Action::from_index(7), Some(Action::Exit));
        assert_eq!(Action::from_index(8), None);
        assert_eq!(RemoteAction::from_index(3), Some(RemoteAction::Back));
        assert_eq!(RemoteAction::from_index(4), None);
    }
}
