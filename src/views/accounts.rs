use super::{crumbs, ConsoleViews, ViewError, ViewResult};
use crate::display::{Block, Cell, DisplayRow, Table};
use crate::format::{decode_quota_size, encode_quota_size};
use crate::rpc::AdminApi;

/// Shown when an account has no explicit limit configured.
const DEFAULT_MAX_OUTGOING_PER_DAY: i64 = 1000;
const DEFAULT_MAX_FIRST_TIME_PER_DAY: i64 = 200;

/// Account limits as typed by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitsInput<'a> {
    pub max_outgoing_messages_per_day: &'a str,
    pub max_first_time_recipients_per_day: &'a str,
    /// Quota string such as "0", "20m" or "1g".
    pub quota_message_size: &'a str,
}

fn parse_count(field: &'static str, value: &str) -> Result<i64, ViewError> {
    value
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .ok_or_else(|| ViewError::InvalidInput {
            field,
            value: value.to_string(),
        })
}

impl<A: AdminApi> ConsoleViews<A> {
    pub(super) async fn accounts(&self) -> ViewResult {
        let accounts = self.api.accounts().await?;

        let view = crumbs(["Accounts"]).heading("Accounts");
        Ok(if accounts.is_empty() {
            view.paragraph("No accounts")
        } else {
            view.push(Block::Links(
                accounts
                    .into_iter()
                    .map(|a| (format!("accounts/{a}"), a))
                    .collect(),
            ))
        })
    }

    pub(super) async fn account(&self, name: &str) -> ViewResult {
        let config = self.api.account(name).await?;

        let default_domain = if config.domain.is_empty() {
            Block::Paragraph("Default domain: (none)".into())
        } else {
            Block::Links(vec![(
                format!("domains/{}", config.domain),
                format!("Default domain: {}", config.domain),
            )])
        };

        let addresses = Table::new(["Address"]).with_rows(if config.destinations.is_empty() {
            vec![DisplayRow::text(["(none, account cannot receive email)"])]
        } else {
            config.destinations.keys().map(|k| DisplayRow::text([k.as_str()])).collect()
        });

        let or_default = |v: i64, default: i64| if v == 0 { default } else { v };
        let limits = Table::new(["Limit", "Value"]).with_rows(vec![
            DisplayRow::new(vec![
                Cell::new("Maximum outgoing messages per day"),
                Cell::number(or_default(
                    config.max_outgoing_messages_per_day,
                    DEFAULT_MAX_OUTGOING_PER_DAY,
                )),
            ]),
            DisplayRow::new(vec![
                Cell::new("Maximum first-time recipients per day"),
                Cell::number(or_default(
                    config.max_first_time_recipients_per_day,
                    DEFAULT_MAX_FIRST_TIME_PER_DAY,
                )),
            ]),
            DisplayRow::new(vec![
                Cell::new("Maximum message size")
                    .title("0 means the server default; use a suffix m, g or t"),
                Cell::new(encode_quota_size(config.quota_message_size)).right(),
            ]),
        ]);

        Ok(crumbs(["Accounts", name])
            .push(default_domain)
            .heading("Addresses")
            .table(addresses)
            .heading("Limits")
            .table(limits))
    }

    /// Validate limits input and send it. Nothing is sent when any field is
    /// invalid.
    pub async fn set_account_limits(&self, account: &str, input: &LimitsInput<'_>) -> Result<(), ViewError> {
        let max_outgoing = parse_count(
            "maximum outgoing messages per day",
            input.max_outgoing_messages_per_day,
        )?;
        let max_first_time = parse_count(
            "maximum first-time recipients per day",
            input.max_first_time_recipients_per_day,
        )?;
        let quota = decode_quota_size(input.quota_message_size)?;

        self.api
            .set_account_limits(account, max_outgoing, max_first_time, quota)
            .await?;
        tracing::info!(account = %account, max_outgoing, max_first_time, quota, "Account limits updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("x", "1000"), Ok(1000));
        assert_eq!(parse_count("x", "0"), Ok(0));
        assert!(parse_count("x", "-1").is_err());
        assert!(parse_count("x", "ten").is_err());
    }
}
