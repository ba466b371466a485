use super::{client_app, report_status};
use crate::libs::messages::Message;
use crate::ui::form::TITLE_MIN_LENGTH;
use crate::{msg_error_anyhow, msg_warning};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title, prompted for when omitted
    title: Option<String>,
}

pub async fn cmd(args: AddArgs) -> Result<()> {
    let title = match args.title {
        Some(title) => title,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskTitle.to_string())
            .allow_empty(true)
            .interact_text()?,
    };

    let mut app = client_app()?;
    match app.submit_title(&title).await {
        Ok(true) => report_status(&mut app, true),
        Ok(false) if app.status().is_none() => {
            msg_warning!(Message::FormTitleTooShort(TITLE_MIN_LENGTH));
            Ok(())
        }
        Ok(false) => report_status(&mut app, false),
        Err(e) => Err(msg_error_anyhow!(e)),
    }
}
