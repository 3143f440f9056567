use crate::cli::{TaskAction, TaskUpdateArgs};
use crate::context::CliContext;
use crate::output;
use tavla_domain::{BoardOperations, FieldUpdate, NewTask, TaskUpdate};

pub async fn handle(ctx: &CliContext, action: TaskAction) {
    match action {
        TaskAction::Create {
            column_id,
            title,
            description,
        } => {
            let new_task = NewTask {
                column_id,
                title,
                description,
            };
            match ctx.service.create_task(new_task).await {
                Ok(task) => output::output_success(task),
                Err(e) => output::output_error(&e.to_string()),
            }
        }
        TaskAction::Get { id } => match ctx.service.get_task(id).await {
            Ok(Some(task)) => output::output_success(task),
            Ok(None) => output::output_error(&format!("Task not found: {}", id)),
            Err(e) => output::output_error(&e.to_string()),
        },
        TaskAction::Update(args) => {
            let updates = build_task_update(&args);
            match ctx.service.update_task(args.id, updates).await {
                Ok(task) => output::output_success(task),
                Err(e) => output::output_error(&e.to_string()),
            }
        }
        TaskAction::Move {
            id,
            column_id,
            index,
        } => match ctx.service.reposition_task(id, column_id, index).await {
            Ok(()) => output::output_success(serde_json::json!({"moved": id})),
            Err(e) => output::output_error(&e.to_string()),
        },
        TaskAction::Delete { id } => match ctx.service.delete_task(id).await {
            Ok(()) => output::output_success(serde_json::json!({"deleted": id})),
            Err(e) => output::output_error(&e.to_string()),
        },
    }
}

fn build_task_update(args: &TaskUpdateArgs) -> TaskUpdate {
    let description = if args.clear_description {
        FieldUpdate::Clear
    } else {
        match &args.description {
            Some(d) => FieldUpdate::Set(d.clone()),
            None => FieldUpdate::NoChange,
        }
    };
    TaskUpdate {
        title: args.title.clone(),
        description,
    }
}
