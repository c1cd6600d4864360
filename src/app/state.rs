use crate::operations::jobs::PendingAction;

/// State for the yes/no confirmation dialog
#[derive(Debug, Clone, Default)]
pub struct ConfirmState {
    pub prompt: String,
    pub pending: Option<PendingAction>,
    pub yes_selected: bool,
}

impl ConfirmState {
    /// Starts on "No".
    pub fn new(action: PendingAction) -> Self {
        Self {
            prompt: action.prompt(),
            pending: Some(action),
            yes_selected: false,
        }
    }
}

/// State for the bucket select dialog
#[derive(Debug, Clone, Default)]
pub struct BucketSelectState {
    pub buckets: Vec<String>,
    pub selected: usize,
}

impl BucketSelectState {
    pub fn new(buckets: Vec<String>, current: Option<&str>) -> Self {
        let selected = current
            .and_then(|name| buckets.iter().position(|b| b == name))
            .unwrap_or(0);
        Self { buckets, selected }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.buckets.len() {
            self.selected += 1;
        }
    }

    pub fn selected_bucket(&self) -> Option<&str> {
        self.buckets.get(self.selected).map(String::as_str)
    }
}
