use super::client_gateway;
use crate::api::{Gateway, SEARCH_PATH};
use crate::libs::envelope::ApiResponse;
use crate::libs::messages::Message;
use crate::libs::task::Task;
use crate::ui::list::TaskList;
use crate::{msg_error_anyhow, msg_print};
use anyhow::Result;
use clap::Args;
use reqwest::Url;

#[derive(Debug, Args)]
pub struct SearchArgs {
    term: String,
}

/// Absolute search URL with `term` percent-encoded as one path segment.
pub fn search_url(gateway: &Gateway, term: &str) -> Result<String> {
    let mut url = Url::parse(&gateway.resolve_url(SEARCH_PATH))?;
    url.path_segments_mut()
        .map_err(|_| msg_error_anyhow!(Message::SearchFailed))?
        .push(term);
    Ok(url.to_string())
}

pub async fn cmd(args: SearchArgs) -> Result<()> {
    let gateway = client_gateway()?;
    let response: ApiResponse<Vec<Task>> = gateway.get(&search_url(&gateway, &args.term)?).await?;

    msg_print!(Message::SearchResultsHeader(args.term), true);
    TaskList::new(response.data.unwrap_or_default(), false).print();
    Ok(())
}
