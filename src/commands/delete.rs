use super::{client_app, report_status};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    id: i64,
}

pub async fn cmd(args: DeleteArgs) -> Result<()> {
    let mut app = client_app()?;
    let removed = app.on_remove_task(args.id).await;
    report_status(&mut app, removed)
}
