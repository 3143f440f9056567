use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;
use tavla_domain::BoardOperations;

pub async fn handle(ctx: &CliContext, action: BoardAction) {
    match action {
        BoardAction::Show => match ctx.service.board().await {
            Ok(board) => output::output_success(board),
            Err(e) => output::output_error(&e.to_string()),
        },
    }
}
