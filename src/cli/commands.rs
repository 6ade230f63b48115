use std::path::Path;

use chrono::NaiveDateTime;

use crate::{
    core::{
        alerts::{AlertNotification, AlertPriority, AlertSettings, NotificationSink, ThresholdAlertTracker},
        services::{AggregationService, BudgetService, StatsPeriod},
        time::{Clock, SystemClock},
    },
    currency::{format_currency, format_percent},
    domain::{DateWindow, PeriodKey},
    errors::{Result, SpendError},
    ledger::{ledger_warnings, Ledger},
    storage::{load_ledger_from_path, JsonAlertStore},
    utils::build_info,
};

use super::{
    output::{progress_bar, Formatter},
    CliContext,
};

const CATEGORY_LIMIT: usize = 5;

fn ledger_arg(args: &[String]) -> Result<&str> {
    args.first()
        .map(String::as_str)
        .ok_or_else(|| SpendError::InvalidInput("missing ledger file argument".into()))
}

fn open_ledger(ctx: &CliContext, path: &str) -> Result<Ledger> {
    let ledger = load_ledger_from_path(Path::new(path))?;
    for warning in ledger_warnings(&ledger) {
        ctx.formatter.print_warning(warning);
    }
    Ok(ledger)
}

fn now() -> NaiveDateTime {
    SystemClock.now()
}

pub fn stats(ctx: &CliContext, args: &[String]) -> Result<()> {
    let ledger = open_ledger(ctx, ledger_arg(args)?)?;
    let period = match args.get(1) {
        Some(raw) => raw.parse::<StatsPeriod>()?,
        None => StatsPeriod::Week,
    };
    let now = now();
    let currency = &ctx.config.currency;
    let out = &ctx.formatter;

    let summary = AggregationService::summarize(&ledger.transactions, &ledger.categories, now, period);
    out.print_header(format!("Spending this {} ({})", period.label().to_lowercase(), summary.window));
    let buckets: Vec<(String, String)> =
        AggregationService::spending_buckets(&ledger.transactions, now, period)
            .into_iter()
            .map(|bucket| (bucket.label, format_currency(bucket.amount, currency)))
            .collect();
    out.print_two_column(&buckets);

    out.print_header("Summary");
    let mut totals = vec![
        ("Total spent".to_string(), format_currency(summary.total_spent, currency)),
        ("Transactions".to_string(), summary.transaction_count.to_string()),
        (
            "Average".to_string(),
            format_currency(summary.average_per_transaction, currency),
        ),
    ];
    if let Some(top) = &summary.top_category {
        totals.push(("Top category".to_string(), top.category.name.clone()));
    }
    out.print_two_column(&totals);

    let by_category =
        AggregationService::category_totals(&ledger.transactions, summary.window, &ledger.categories);
    if !by_category.is_empty() {
        out.print_header("By category");
        let rows: Vec<(String, String)> = by_category
            .iter()
            .take(CATEGORY_LIMIT)
            .map(|entry| {
                let share = if summary.total_spent > 0.0 {
                    entry.amount / summary.total_spent
                } else {
                    0.0
                };
                (
                    entry.category.name.clone(),
                    format!("{} ({})", format_currency(entry.amount, currency), format_percent(share)),
                )
            })
            .collect();
        out.print_two_column(&rows);
    }
    Ok(())
}

pub fn budget(ctx: &CliContext, args: &[String]) -> Result<()> {
    let ledger = open_ledger(ctx, ledger_arg(args)?)?;
    let month = match args.get(1) {
        Some(raw) => PeriodKey::parse(raw)?.month_window(),
        None => DateWindow::month_containing(now().date()),
    };
    let currency = &ctx.config.currency;
    let out = &ctx.formatter;
    let overview = BudgetService::month_overview(&ledger.categories, &ledger.transactions, month);

    out.print_header(format!("Budget {}", month.period_key()));
    let rows: Vec<(String, String)> = overview
        .categories
        .iter()
        .map(|entry| {
            let detail = if entry.budget > 0.0 {
                format!(
                    "{} of {} {} {} {}",
                    format_currency(entry.spent, currency),
                    format_currency(entry.budget, currency),
                    progress_bar(entry.progress, 10),
                    format_percent(entry.progress),
                    out.status_text(entry.status)
                )
            } else {
                format!(
                    "{} spent {}",
                    format_currency(entry.spent, currency),
                    out.status_text(entry.status)
                )
            };
            (entry.name.clone(), detail)
        })
        .collect();
    out.print_two_column(&rows);
    out.print_detail(format!(
        "Total: {} of {} ({})",
        format_currency(overview.total_spent, currency),
        format_currency(overview.total_budget, currency),
        format_percent(overview.overall_progress)
    ));
    Ok(())
}

/// Prints scheduled notifications to the terminal.
struct ConsoleSink<'a> {
    formatter: &'a Formatter,
}

impl NotificationSink for ConsoleSink<'_> {
    fn schedule(&self, notification: &AlertNotification) -> Result<()> {
        let line = format!("{}: {}", notification.title, notification.body);
        match notification.priority {
            AlertPriority::Passive => self.formatter.print_warning(line),
            AlertPriority::TimeSensitive => self.formatter.print_error(line),
        }
        Ok(())
    }
}

fn tracker(ctx: &CliContext) -> Result<ThresholdAlertTracker> {
    let store = JsonAlertStore::new(Some(ctx.base.clone()))?;
    Ok(ThresholdAlertTracker::new(store, AlertSettings::from(&ctx.config)))
}

pub fn alerts(ctx: &CliContext, args: &[String]) -> Result<()> {
    let ledger = open_ledger(ctx, ledger_arg(args)?)?;
    let out = &ctx.formatter;
    if !ctx.config.notifications_enabled {
        out.print_detail("Budget notifications are disabled.");
        return Ok(());
    }
    let tracker = tracker(ctx)?;
    let sink = ConsoleSink { formatter: out };
    let requests =
        tracker.evaluate_and_dispatch(&ledger.categories, &ledger.transactions, now(), &sink)?;
    if requests.is_empty() {
        out.print_info("No new budget alerts.");
    }
    Ok(())
}

pub fn reset_alerts(ctx: &CliContext) -> Result<()> {
    tracker(ctx)?.reset_monthly_alerts()?;
    ctx.formatter.print_success("Budget alert history cleared.");
    Ok(())
}

pub fn version() {
    let meta = build_info::current();
    let out = Formatter::new();
    out.print_info(format!("spendwise_core {}", meta.version));
    out.print_two_column(&[
        ("commit".to_string(), format!("{} ({})", meta.git_hash, meta.git_status)),
        ("built".to_string(), meta.timestamp.to_string()),
        ("profile".to_string(), meta.profile.to_string()),
    ]);
}
