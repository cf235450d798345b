/// Observable state of a one-shot asynchronous load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Pending,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(v) => Some(v),
            _ => None,
        }
    }

    pub fn loaded_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Loaded(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }
}
