use crate::modules::poll::database::PollDatabase;
use crate::store::Store;

/// Process-lifetime state handed to every command through `Data`.
#[derive(Debug)]
pub struct Databases {
    pub polls: Store<PollDatabase>,
}

impl Databases {
    pub fn new() -> Self {
        Self {
            polls: Store::new(),
        }
    }
}
