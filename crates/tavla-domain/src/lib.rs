pub mod board;
pub mod column;
pub mod field_update;
pub mod operations;
pub mod reposition;
pub mod task;

pub use board::{BoardColumn, BoardView};
pub use column::{Column, ColumnId};
pub use field_update::FieldUpdate;
pub use operations::BoardOperations;
pub use reposition::{Placement, RepositionPlan};
pub use task::{NewTask, Task, TaskId, TaskUpdate};
