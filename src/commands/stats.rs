use super::client_gateway;
use crate::api::STATISTICS_PATH;
use crate::libs::envelope::ApiResponse;
use crate::libs::messages::Message;
use crate::libs::task::TaskStats;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use prettytable::{row, Table};

pub async fn cmd() -> Result<()> {
    let response: ApiResponse<TaskStats> = client_gateway()?.get(STATISTICS_PATH).await?;
    let Some(stats) = response.data else {
        msg_bail_anyhow!(Message::StatisticsFailed);
    };

    msg_print!(Message::StatisticsHeader, true);
    let mut table = Table::new();
    table.add_row(row![Message::StatisticsTotal, stats.total]);
    table.add_row(row![Message::StatisticsCompleted, stats.completed]);
    table.add_row(row![Message::StatisticsPending, stats.pending]);
    table.add_row(row![Message::StatisticsOverdue, stats.overdue]);
    table.add_row(row![Message::StatisticsPercent, format!("{:.2}", stats.percent_complete)]);
    table.printstd();

    Ok(())
}
