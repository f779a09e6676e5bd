//! `fintrack_cli`: a one-shot command front end over [`FinanceTracker`].

use std::{
    env,
    io::{self, Write},
};

use chrono::NaiveDate;
use colored::Colorize;
use fintrack_config::{Config, ConfigManager};
use fintrack_core::{Dashboard, Summary};
use fintrack_domain::{
    Amounted, DateRange, Displayable, Expense, FixedBill, IncomeEntry, Money, PaymentMethod,
    PeriodMode, PeriodSelection, Record, RecordKind, ReserveInvestment, ReserveKind, Session,
};
use fintrack_storage_json::JsonLedgerStore;
use serde::Serialize;
use strsim::levenshtein;
use uuid::Uuid;

use crate::{app::FinanceTracker, errors::AppError, utils};

const COMMANDS: [&str; 8] = [
    "summary",
    "add",
    "delete",
    "categories",
    "backups",
    "restore",
    "version",
    "help",
];

const HELP: &str = "\
Usage: fintrack_cli <command> [options]

Commands:
  summary [--period <mode>] [--from YYYY-MM-DD] [--to YYYY-MM-DD] [--details] [--json]
      Totals for a period. Modes: day, week, month, year, all, custom.
  add <income|expense|bill|reserve> --description <text> --amount <value>
      [--date YYYY-MM-DD] [--category <name>] [--payment <cash|debit|credit|pix>]
      [--reserve-kind <emergency|goal|investment>] [--due-day <1-31>] [--inactive]
  delete <kind> <id>
  categories <kind>
  backups
  restore <backup-id>
  version
  help

Every command except version and help accepts --user <uuid>, --email <address>
and --name <display name>. The last --user is remembered.";

/// Options shared by every command acting on a user's records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionArgs {
    pub user: Option<Uuid>,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryArgs {
    pub session: SessionArgs,
    pub mode: Option<PeriodMode>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub details: bool,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddArgs {
    pub session: SessionArgs,
    pub kind: RecordKind,
    pub description: String,
    pub amount: Money,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub method: Option<PaymentMethod>,
    pub reserve_kind: Option<ReserveKind>,
    pub due_day: Option<u8>,
    pub inactive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Summary(SummaryArgs),
    Add(AddArgs),
    Delete {
        session: SessionArgs,
        kind: RecordKind,
        id: Uuid,
    },
    Categories {
        session: SessionArgs,
        kind: RecordKind,
    },
    Backups {
        session: SessionArgs,
    },
    Restore {
        session: SessionArgs,
        backup: String,
    },
    Version,
    Help,
}

/// Entry point used by the `fintrack_cli` binary.
pub fn run_cli() -> Result<(), AppError> {
    let command = parse_args(env::args().skip(1))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(command, &mut out)
}

/// Executes `command` against the data directory from [`utils::app_data_dir`].
pub fn run_command(command: Command, out: &mut dyn Write) -> Result<(), AppError> {
    let session_args = match &command {
        Command::Version => {
            writeln!(out, "{}", utils::build_info::current().summary_line())?;
            return Ok(());
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(());
        }
        Command::Summary(args) => &args.session,
        Command::Add(args) => &args.session,
        Command::Delete { session, .. }
        | Command::Categories { session, .. }
        | Command::Backups { session }
        | Command::Restore { session, .. } => session,
    };

    let manager = ConfigManager::with_base_dir(&utils::app_data_dir())?;
    let mut config = manager.load()?;
    let session = resolve_session(session_args, &mut config, &manager)?;
    if !config.ui_color_enabled {
        colored::control::set_override(false);
    }

    match command {
        Command::Summary(args) => {
            let tracker = FinanceTracker::open(config)?;
            print_summary(&tracker, &session, &args, out)
        }
        Command::Add(args) => {
            let tracker = FinanceTracker::open(config)?;
            let today = tracker.clock().today();
            let record = build_record(&session, args, today);
            let label = record.display_label();
            let amount = tracker.format_amount(record.amount());
            let id = tracker.record(&session, record)?;
            writeln!(out, "Added {label} ({amount}) as {id}")?;
            Ok(())
        }
        Command::Delete { kind, id, .. } => {
            let tracker = FinanceTracker::open(config)?;
            tracker.remove(&session, kind, id)?;
            writeln!(out, "Deleted {kind} {id}")?;
            Ok(())
        }
        Command::Categories { kind, .. } => {
            let tracker = FinanceTracker::open(config)?;
            let categories = tracker.categories(&session, kind)?;
            if categories.is_empty() {
                writeln!(out, "No {kind} categories yet.")?;
            }
            for category in categories {
                writeln!(out, "{category}")?;
            }
            Ok(())
        }
        Command::Backups { .. } => {
            let store = json_store(&config)?;
            let backups = store.list_backups(&session)?;
            if backups.is_empty() {
                writeln!(out, "No backups yet.")?;
            }
            for backup in backups {
                let when = backup
                    .created_at
                    .map(|stamp| stamp.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown time".into());
                writeln!(out, "{}  {when}", backup.id)?;
            }
            Ok(())
        }
        Command::Restore { backup, .. } => {
            let store = json_store(&config)?;
            let book = store.restore_backup(&session, &backup)?;
            writeln!(out, "Restored {backup} ({} records)", book.len())?;
            Ok(())
        }
        Command::Version | Command::Help => Ok(()),
    }
}

fn json_store(config: &Config) -> Result<JsonLedgerStore, AppError> {
    Ok(JsonLedgerStore::under_root(
        &config.resolve_data_root(),
        config.backup_retention,
    )?)
}

/// Picks the explicit `--user`, else the remembered one, and remembers it.
fn resolve_session(
    args: &SessionArgs,
    config: &mut Config,
    manager: &ConfigManager,
) -> Result<Session, AppError> {
    let user_id = match (args.user, config.last_user) {
        (Some(user), remembered) => {
            if remembered != Some(user) {
                config.last_user = Some(user);
                manager.save(config)?;
                tracing::debug!(%user, "remembered user");
            }
            user
        }
        (None, Some(remembered)) => remembered,
        (None, None) => return Err(AppError::NoUser),
    };
    let mut session = Session::new(user_id);
    if let Some(email) = &args.email {
        session = session.with_email(email.clone());
    }
    if let Some(name) = &args.name {
        session = session.with_display_name(name.clone());
    }
    Ok(session)
}

fn build_record(session: &Session, args: AddArgs, today: NaiveDate) -> Record {
    let user = session.user_id;
    let date = args.date.unwrap_or(today);
    let record: Record = match args.kind {
        RecordKind::Income => IncomeEntry::new(user, args.description, args.amount, date).into(),
        RecordKind::Expense => {
            let mut expense = Expense::new(user, args.description, args.amount, date);
            if let Some(method) = args.method {
                expense = expense.with_payment_method(method);
            }
            expense.into()
        }
        RecordKind::FixedBill => {
            let mut bill = FixedBill::new(user, args.description, args.amount);
            if let Some(day) = args.due_day {
                bill = bill.with_due_day(day);
            }
            if let Some(date) = args.date {
                bill = bill.with_date(date);
            }
            if args.inactive {
                bill = bill.inactive();
            }
            bill.into()
        }
        RecordKind::Reserve => ReserveInvestment::new(
            user,
            args.description,
            args.amount,
            args.reserve_kind.unwrap_or(ReserveKind::EmergencyReserve),
            date,
        )
        .into(),
    };
    match args.category {
        Some(category) => with_category(record, category),
        None => record,
    }
}

fn with_category(record: Record, category: String) -> Record {
    match record {
        Record::Income(entry) => entry.with_category(category).into(),
        Record::Expense(expense) => expense.with_category(category).into(),
        Record::FixedBill(bill) => bill.with_category(category).into(),
        Record::Reserve(reserve) => reserve.with_category(category).into(),
    }
}

#[derive(Serialize)]
struct SummaryReport<'a> {
    mode: PeriodMode,
    range: DateRange,
    summary: &'a Summary,
}

fn print_summary(
    tracker: &FinanceTracker,
    session: &Session,
    args: &SummaryArgs,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let selection = match (args.mode, args.from.is_some() || args.to.is_some()) {
        (None | Some(PeriodMode::Custom), true) => PeriodSelection::custom(args.from, args.to),
        (Some(mode), false) => PeriodSelection::new(mode),
        (None, false) => PeriodSelection::new(tracker.config().default_period),
        (Some(mode), true) => {
            return Err(AppError::InvalidArguments(format!(
                "--from/--to only apply to the custom period, not `{mode}`"
            )))
        }
    };
    let dashboard = tracker.dashboard(session, &selection)?;

    if args.json {
        let report = SummaryReport {
            mode: selection.mode,
            range: dashboard.range,
            summary: &dashboard.summary,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    let summary = &dashboard.summary;
    writeln!(out, "Hello, {}!", session.greeting_name())?;
    writeln!(out, "Period: {} ({})", selection.mode, dashboard.range)?;
    for (label, amount) in [
        ("Income", summary.total_income),
        ("Expenses", summary.total_expenses),
        ("Fixed bills", summary.total_bills),
        ("Reserves", summary.total_reserves),
    ] {
        writeln!(out, "{label:<12} {}", tracker.format_amount(amount))?;
    }
    let balance = tracker.format_amount(summary.balance);
    let balance = if summary.is_deficit() {
        balance.as_str().red().bold()
    } else {
        balance.as_str().green().bold()
    };
    writeln!(out, "{:<12} {balance}", "Balance")?;

    if args.details {
        print_details(&dashboard, out)?;
    }
    Ok(())
}

fn print_details(dashboard: &Dashboard, out: &mut dyn Write) -> Result<(), AppError> {
    let sections = [
        ("Income", labels(&dashboard.income)),
        ("Expenses", labels(&dashboard.expenses)),
        ("Fixed bills", labels(&dashboard.bills)),
        ("Reserves", labels(&dashboard.reserves)),
    ];
    for (title, entries) in sections {
        writeln!(out)?;
        writeln!(out, "{}", title.bold())?;
        if entries.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for label in entries {
            writeln!(out, "  {label}")?;
        }
    }
    Ok(())
}

fn labels<T: Displayable>(items: &[T]) -> Vec<String> {
    items.iter().map(Displayable::display_label).collect()
}

/// Parses the arguments after the program name.
pub fn parse_args<I>(args: I) -> Result<Command, AppError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(raw) = args.next() else {
        return Ok(Command::Help);
    };
    let name = raw.to_lowercase();
    let mut parsed = ArgList::parse(args)?;

    let command = match name.as_str() {
        "help" | "--help" | "-h" => Command::Help,
        "version" | "--version" | "-V" => Command::Version,
        "summary" => {
            let session = parsed.session()?;
            Command::Summary(SummaryArgs {
                session,
                mode: parsed
                    .take("period")
                    .map(|label| label.parse::<PeriodMode>())
                    .transpose()?,
                from: parsed.take("from").map(|raw| parse_date(&raw)).transpose()?,
                to: parsed.take("to").map(|raw| parse_date(&raw)).transpose()?,
                details: parsed.switch("details"),
                json: parsed.switch("json"),
            })
        }
        "add" => {
            let session = parsed.session()?;
            let kind = parsed.positional("record kind")?.parse::<RecordKind>()?;
            let description = parsed.require("description")?;
            let amount = parsed.require("amount")?.parse::<Money>()?;
            Command::Add(AddArgs {
                session,
                kind,
                description,
                amount,
                date: parsed.take("date").map(|raw| parse_date(&raw)).transpose()?,
                category: parsed.take("category"),
                method: parsed
                    .take("payment")
                    .map(|raw| raw.parse::<PaymentMethod>())
                    .transpose()?,
                reserve_kind: parsed
                    .take("reserve-kind")
                    .map(|raw| raw.parse::<ReserveKind>())
                    .transpose()?,
                due_day: parsed
                    .take("due-day")
                    .map(|raw| parse_due_day(&raw))
                    .transpose()?,
                inactive: parsed.switch("inactive"),
            })
        }
        "delete" => {
            let session = parsed.session()?;
            let kind = parsed.positional("record kind")?.parse::<RecordKind>()?;
            let id = parse_uuid(&parsed.positional("record id")?)?;
            Command::Delete { session, kind, id }
        }
        "categories" => {
            let session = parsed.session()?;
            let kind = parsed.positional("record kind")?.parse::<RecordKind>()?;
            Command::Categories { session, kind }
        }
        "backups" => Command::Backups {
            session: parsed.session()?,
        },
        "restore" => {
            let session = parsed.session()?;
            let backup = parsed.positional("backup id")?;
            Command::Restore { session, backup }
        }
        _ => return Err(unknown_command(&raw)),
    };
    parsed.finish()?;
    Ok(command)
}

fn unknown_command(input: &str) -> AppError {
    let needle = input.to_lowercase();
    let suggestion = COMMANDS
        .iter()
        .map(|name| (levenshtein(name, &needle), *name))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3);
    let mut message = format!("Unknown command `{input}`. Run `fintrack_cli help`.");
    if let Some((_, best)) = suggestion {
        message.push_str(&format!(" Did you mean `{best}`?"));
    }
    AppError::InvalidArguments(message)
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        AppError::InvalidArguments(format!("invalid date `{input}` (use YYYY-MM-DD)"))
    })
}

fn parse_uuid(input: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(input)
        .map_err(|_| AppError::InvalidArguments(format!("invalid id `{input}`")))
}

fn parse_due_day(input: &str) -> Result<u8, AppError> {
    match input.parse::<u8>() {
        Ok(day) if (1..=31).contains(&day) => Ok(day),
        _ => Err(AppError::InvalidArguments(format!(
            "due day must be between 1 and 31, got `{input}`"
        ))),
    }
}

/// Positional arguments, `--key value` options and bare `--switch`es.
#[derive(Debug, Default)]
struct ArgList {
    positional: Vec<String>,
    options: Vec<(String, String)>,
    switches: Vec<String>,
}

const SWITCHES: [&str; 3] = ["details", "json", "inactive"];

impl ArgList {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, AppError> {
        let mut list = Self::default();
        let mut args = args.peekable();
        while let Some(arg) = args.next() {
            let Some(key) = arg.strip_prefix("--") else {
                list.positional.push(arg);
                continue;
            };
            if let Some((key, value)) = key.split_once('=') {
                list.options.push((key.to_string(), value.to_string()));
            } else if SWITCHES.contains(&key) {
                list.switches.push(key.to_string());
            } else {
                let value = args.next().ok_or_else(|| {
                    AppError::InvalidArguments(format!("missing value for `--{key}`"))
                })?;
                list.options.push((key.to_string(), value));
            }
        }
        Ok(list)
    }

    fn take(&mut self, key: &str) -> Option<String> {
        let index = self.options.iter().rposition(|(name, _)| name == key)?;
        let (_, value) = self.options.remove(index);
        self.options.retain(|(name, _)| name != key);
        Some(value)
    }

    fn require(&mut self, key: &str) -> Result<String, AppError> {
        self.take(key)
            .ok_or_else(|| AppError::InvalidArguments(format!("missing `--{key}`")))
    }

    fn switch(&mut self, key: &str) -> bool {
        let before = self.switches.len();
        self.switches.retain(|name| name != key);
        self.switches.len() != before
    }

    fn positional(&mut self, what: &str) -> Result<String, AppError> {
        if self.positional.is_empty() {
            return Err(AppError::InvalidArguments(format!("missing {what}")));
        }
        Ok(self.positional.remove(0))
    }

    fn session(&mut self) -> Result<SessionArgs, AppError> {
        Ok(SessionArgs {
            user: self.take("user").map(|raw| parse_uuid(&raw)).transpose()?,
            email: self.take("email"),
            name: self.take("name"),
        })
    }

    /// Rejects whatever no command consumed.
    fn finish(self) -> Result<(), AppError> {
        if let Some(extra) = self.positional.first() {
            return Err(AppError::InvalidArguments(format!(
                "unexpected argument `{extra}`"
            )));
        }
        if let Some((key, _)) = self.options.first() {
            return Err(AppError::InvalidArguments(format!(
                "unknown option `--{key}`"
            )));
        }
        if let Some(key) = self.switches.first() {
            return Err(AppError::InvalidArguments(format!(
                "`--{key}` does not apply to this command"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn no_arguments_prints_help() {
        assert_eq!(parse_args(Vec::new()).expect("parse"), Command::Help);
    }

    #[test]
    fn summary_defaults_to_configured_period() {
        let command = parse_args(args("summary")).expect("parse");
        let Command::Summary(summary) = command else {
            panic!("expected summary");
        };
        assert_eq!(summary.mode, None);
        assert_eq!(summary.session, SessionArgs::default());
        assert!(!summary.json);
    }

    #[test]
    fn summary_reads_period_bounds_and_user() {
        let user = Uuid::new_v4();
        let line = format!("summary --user {user} --period semana --json");
        let Command::Summary(summary) = parse_args(args(&line)).expect("parse") else {
            panic!("expected summary");
        };
        assert_eq!(summary.session.user, Some(user));
        assert_eq!(summary.mode, Some(PeriodMode::Week));
        assert!(summary.json);

        let Command::Summary(custom) =
            parse_args(args("summary --from=2025-01-01 --to 2025-01-31")).expect("parse")
        else {
            panic!("expected summary");
        };
        assert_eq!(custom.from, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(custom.to, NaiveDate::from_ymd_opt(2025, 1, 31));
    }

    #[test]
    fn summary_rejects_unknown_period_and_bad_dates() {
        assert!(matches!(
            parse_args(args("summary --period fortnight")),
            Err(AppError::PeriodMode(_))
        ));
        assert!(matches!(
            parse_args(args("summary --from 01/02/2025")),
            Err(AppError::InvalidArguments(_))
        ));
    }

    #[test]
    fn add_parses_expense_options() {
        let line = "add expense --description Market --amount 120,50 --payment pix --category Food";
        let Command::Add(add) = parse_args(args(line)).expect("parse") else {
            panic!("expected add");
        };
        assert_eq!(add.kind, RecordKind::Expense);
        assert_eq!(add.description, "Market");
        assert_eq!(add.amount, Money::from_cents(12_050));
        assert_eq!(add.method, Some(PaymentMethod::Pix));
        assert_eq!(add.category.as_deref(), Some("Food"));
    }

    #[test]
    fn add_parses_reserve_kind() {
        let line = "add reserve --description Trip --amount 300 --reserve-kind goal";
        let Command::Add(add) = parse_args(args(line)).expect("parse") else {
            panic!("expected add");
        };
        assert_eq!(add.kind, RecordKind::Reserve);
        assert_eq!(add.reserve_kind, Some(ReserveKind::Goal));
        assert!(matches!(
            parse_args(args("add expense --description X --amount 1 --method pix")),
            Err(AppError::InvalidArguments(message)) if message.contains("--method")
        ));
    }

    #[test]
    fn add_requires_amount_and_valid_due_day() {
        assert!(matches!(
            parse_args(args("add income --description Salary")),
            Err(AppError::InvalidArguments(message)) if message.contains("--amount")
        ));
        assert!(matches!(
            parse_args(args("add bill --description Rent --amount 10 --due-day 32")),
            Err(AppError::InvalidArguments(_))
        ));
    }

    #[test]
    fn leftover_arguments_are_rejected() {
        assert!(matches!(
            parse_args(args("backups extra")),
            Err(AppError::InvalidArguments(message)) if message.contains("extra")
        ));
        assert!(matches!(
            parse_args(args("categories income --colour red")),
            Err(AppError::InvalidArguments(message)) if message.contains("--colour")
        ));
        assert!(matches!(
            parse_args(args("backups --json")),
            Err(AppError::InvalidArguments(_))
        ));
    }

    #[test]
    fn unknown_command_suggests_nearest() {
        let Err(AppError::InvalidArguments(message)) = parse_args(args("sumary")) else {
            panic!("expected invalid arguments");
        };
        assert!(message.contains("Did you mean `summary`?"));
    }

    #[test]
    fn built_records_carry_optional_fields() {
        let session = Session::new(Uuid::new_v4());
        let today = NaiveDate::from_ymd_opt(2025, 9, 9).unwrap();
        let add = AddArgs {
            session: SessionArgs::default(),
            kind: RecordKind::FixedBill,
            description: "Rent".into(),
            amount: Money::from_cents(150_000),
            date: None,
            category: Some("Housing".into()),
            method: None,
            reserve_kind: None,
            due_day: Some(10),
            inactive: true,
        };
        let Record::FixedBill(bill) = build_record(&session, add, today) else {
            panic!("expected a fixed bill");
        };
        assert_eq!(bill.user_id, session.user_id);
        assert_eq!(bill.due_day, Some(10));
        assert_eq!(bill.date, None);
        assert!(!bill.active);
        assert_eq!(bill.category.as_deref(), Some("Housing"));
    }
}
