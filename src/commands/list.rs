use super::{client_app, report_status};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let mut app = client_app()?;
    let loaded = app.load_tasks().await;
    report_status(&mut app, loaded)?;
    app.list().print();
    Ok(())
}
