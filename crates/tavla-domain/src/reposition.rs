//! Planning half of the task repositioning engine.
//!
//! Given transactional snapshots of the affected columns, [`plan_reposition`]
//! computes the complete set of placement writes that restore dense zero-based
//! positions in the destination column (and the source column, when the task
//! changes columns). The function is pure; applying and committing the writes
//! is the store's job.

use crate::column::ColumnId;
use crate::task::{Task, TaskId};

/// One position/column write for a single task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub task_id: TaskId,
    pub column_id: ColumnId,
    pub position: i32,
}

/// Every write needed to restore dense ordering in the affected columns.
#[derive(Debug, Clone, Default)]
pub struct RepositionPlan {
    pub placements: Vec<Placement>,
}

impl RepositionPlan {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Clamp a client-requested index into `[0, remaining]`. The index comes from
/// a possibly-stale view of the board and is advisory only: negative values
/// land at the head, values past the end land at the tail.
pub fn clamp_index(requested: i64, remaining: usize) -> usize {
    requested.clamp(0, remaining as i64) as usize
}

/// Compute the placement writes for moving `task` into `destination_column_id`
/// at `requested_index`.
///
/// `destination_tasks` is the destination column's current task list and
/// `source_tasks` the source column's, both position-ordered and read within
/// the same transaction the plan will be applied in. The moved task may still
/// appear in either list; it is excluded before the insert. When the move
/// stays within one column, `source_tasks` is ignored.
///
/// Every task in the destination column gets a placement, not just the shifted
/// ones: the stored numbering may already be stale or inconsistent, and the
/// full rewrite re-establishes the dense invariant regardless.
pub fn plan_reposition(
    task: &Task,
    destination_column_id: ColumnId,
    requested_index: i64,
    destination_tasks: &[Task],
    source_tasks: &[Task],
) -> RepositionPlan {
    let mut final_order: Vec<TaskId> = destination_tasks
        .iter()
        .map(|t| t.id)
        .filter(|id| *id != task.id)
        .collect();

    let index = clamp_index(requested_index, final_order.len());
    final_order.insert(index, task.id);

    let mut placements: Vec<Placement> = final_order
        .iter()
        .enumerate()
        .map(|(position, task_id)| Placement {
            task_id: *task_id,
            column_id: destination_column_id,
            position: position as i32,
        })
        .collect();

    if task.column_id != destination_column_id {
        // Close the gap the task leaves behind in its old column.
        placements.extend(
            source_tasks
                .iter()
                .filter(|t| t.id != task.id)
                .enumerate()
                .map(|(position, t)| Placement {
                    task_id: t.id,
                    column_id: task.column_id,
                    position: position as i32,
                }),
        );
    }

    RepositionPlan { placements }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: TaskId, column_id: ColumnId, position: i32) -> Task {
        Task::new(id, column_id, format!("Task {}", id), None, position)
    }

    fn make_column(column_id: ColumnId, ids: &[TaskId]) -> Vec<Task> {
        ids.iter()
            .enumerate()
            .map(|(position, id)| make_task(*id, column_id, position as i32))
            .collect()
    }

    fn positions_in(plan: &RepositionPlan, column_id: ColumnId) -> Vec<(TaskId, i32)> {
        let mut entries: Vec<_> = plan
            .placements
            .iter()
            .filter(|p| p.column_id == column_id)
            .map(|p| (p.task_id, p.position))
            .collect();
        entries.sort_by_key(|(_, position)| *position);
        entries
    }

    fn assert_dense(plan: &RepositionPlan, column_id: ColumnId) {
        let entries = positions_in(plan, column_id);
        for (expected, (_, position)) in entries.iter().enumerate() {
            assert_eq!(*position, expected as i32);
        }
    }

    #[test]
    fn test_single_column_reorder_to_head() {
        let tasks = make_column(1, &[10, 11, 12, 13, 14]);
        let moved = tasks[2].clone();

        let plan = plan_reposition(&moved, 1, 0, &tasks, &[]);

        assert_eq!(
            positions_in(&plan, 1),
            vec![(12, 0), (10, 1), (11, 2), (13, 3), (14, 4)]
        );
        assert_dense(&plan, 1);
    }

    #[test]
    fn test_cross_column_move() {
        let source = make_column(1, &[10, 11, 12, 13]);
        let destination = make_column(2, &[20, 21]);
        let moved = source[1].clone();

        let plan = plan_reposition(&moved, 2, 1, &destination, &source);

        assert_eq!(positions_in(&plan, 2), vec![(20, 0), (11, 1), (21, 2)]);
        assert_eq!(positions_in(&plan, 1), vec![(10, 0), (12, 1), (13, 2)]);
        assert_dense(&plan, 1);
        assert_dense(&plan, 2);
    }

    #[test]
    fn test_clamp_low() {
        let tasks = make_column(1, &[10, 11, 12, 13]);
        let moved = tasks[3].clone();

        let plan = plan_reposition(&moved, 1, -5, &tasks, &[]);

        assert_eq!(positions_in(&plan, 1)[0], (13, 0));
        assert_dense(&plan, 1);
    }

    #[test]
    fn test_clamp_high() {
        let source = make_column(1, &[10]);
        let destination = make_column(2, &[20, 21, 22]);
        let moved = source[0].clone();

        let plan = plan_reposition(&moved, 2, 99, &destination, &source);

        assert_eq!(
            positions_in(&plan, 2),
            vec![(20, 0), (21, 1), (22, 2), (10, 3)]
        );
        // Source column empties out entirely.
        assert!(positions_in(&plan, 1).is_empty());
    }

    #[test]
    fn test_no_op_move_keeps_same_order() {
        let tasks = make_column(1, &[10, 11, 12]);
        let moved = tasks[1].clone();

        let plan = plan_reposition(&moved, 1, 1, &tasks, &[]);

        assert_eq!(positions_in(&plan, 1), vec![(10, 0), (11, 1), (12, 2)]);
    }

    #[test]
    fn test_rewrite_repairs_stale_numbering() {
        // Positions with gaps and duplicates, as a stale or damaged store
        // might hold. The plan must still come out dense in list order.
        let tasks = vec![
            make_task(10, 1, 3),
            make_task(11, 1, 3),
            make_task(12, 1, 7),
        ];
        let moved = tasks[2].clone();

        let plan = plan_reposition(&moved, 1, 0, &tasks, &[]);

        assert_eq!(positions_in(&plan, 1), vec![(12, 0), (10, 1), (11, 2)]);
    }

    #[test]
    fn test_move_into_empty_column() {
        let source = make_column(1, &[10, 11]);
        let moved = source[0].clone();

        let plan = plan_reposition(&moved, 2, 0, &[], &source);

        assert_eq!(positions_in(&plan, 2), vec![(10, 0)]);
        assert_eq!(positions_in(&plan, 1), vec![(11, 0)]);
    }

    #[test]
    fn test_clamp_index_bounds() {
        assert_eq!(clamp_index(-1, 3), 0);
        assert_eq!(clamp_index(0, 3), 0);
        assert_eq!(clamp_index(2, 3), 2);
        assert_eq!(clamp_index(3, 3), 3);
        assert_eq!(clamp_index(99, 3), 3);
        assert_eq!(clamp_index(0, 0), 0);
    }
}
