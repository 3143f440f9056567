use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::task::Task;

/// Full board snapshot: columns in rank order, each carrying its tasks in
/// position order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    pub columns: Vec<BoardColumn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardColumn {
    #[serde(flatten)]
    pub column: Column,
    pub tasks: Vec<Task>,
}
