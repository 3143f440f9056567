use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::output;
use tavla_domain::BoardOperations;

pub async fn handle(ctx: &CliContext, action: ColumnAction) {
    match action {
        ColumnAction::Create { name } => match ctx.service.create_column(name).await {
            Ok(column) => output::output_success(column),
            Err(e) => output::output_error(&e.to_string()),
        },
        ColumnAction::List => match ctx.service.list_columns().await {
            Ok(columns) => output::output_list(columns),
            Err(e) => output::output_error(&e.to_string()),
        },
    }
}
