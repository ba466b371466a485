use super::{client_app, report_status};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ToggleArgs {
    id: i64,
}

pub async fn cmd(args: ToggleArgs) -> Result<()> {
    let mut app = client_app()?;
    if !app.load_tasks().await {
        return report_status(&mut app, false);
    }
    app.take_status();

    let toggled = app.toggle_task(args.id).await;
    report_status(&mut app, toggled)?;
    app.list().print();
    Ok(())
}
