//! Command handlers. Each returns the text to print so it can be tested
//! without a terminal.

use engine::{Engine, Money, PaydayStatus, UserProfile};

use crate::{
    cli::{Command, ConvertArgs, FormatArgs, PaydayArgs, Profile, ProfileCommand, ProfileSetArgs},
    error::Result,
};

const ONBOARDING_HINT: &str =
    "No profile yet. Run `flosyn profile set --salary <AMOUNT> --payday <DAY>` to get started.";

pub async fn run(command: Command, engine: &Engine) -> Result<String> {
    match command {
        Command::Profile(Profile { command }) => match command {
            ProfileCommand::Show { json } => show_profile(engine, json).await,
            ProfileCommand::Set(args) => set_profile(engine, args).await,
            ProfileCommand::Reset => reset_profile(engine).await,
        },
        Command::Payday(args) => payday_countdown(engine, args).await,
        Command::Format(args) => Ok(format_amount(&args)),
        Command::Convert(args) => convert(&args),
    }
}

async fn show_profile(engine: &Engine, json: bool) -> Result<String> {
    let Some(profile) = engine.profile().await? else {
        return Ok(ONBOARDING_HINT.to_string());
    };
    if json {
        return Ok(serde_json::to_string_pretty(&profile)?);
    }
    Ok(describe_profile(&profile))
}

fn describe_profile(profile: &UserProfile) -> String {
    format!(
        "Salary:   {}\nPayday:   {}\nCurrency: {}\nSince:    {}\nUpdated:  {}",
        profile.salary.format_with_decimals(profile.currency),
        profile.payday,
        profile.currency,
        profile.created_at.format("%Y-%m-%d %H:%M"),
        profile.updated_at.format("%Y-%m-%d %H:%M"),
    )
}

async fn set_profile(engine: &Engine, args: ProfileSetArgs) -> Result<String> {
    let profile = engine
        .save_profile(args.salary, args.payday, args.currency)
        .await?;
    Ok(format!(
        "Profile saved: {} paid on {}.",
        profile.salary.format_with_decimals(profile.currency),
        describe_payday(profile.payday),
    ))
}

async fn reset_profile(engine: &Engine) -> Result<String> {
    let removed = engine.delete_all_profiles().await?;
    Ok(format!("Removed {removed} profile(s)."))
}

async fn payday_countdown(engine: &Engine, args: PaydayArgs) -> Result<String> {
    let today = args.from.unwrap_or_else(|| engine.clock().today());

    let status = match args.day {
        Some(day) => PaydayStatus::for_rule(day, today)?,
        None => match engine.profile().await? {
            Some(profile) => PaydayStatus::compute(&profile, today)?,
            None => return Ok(ONBOARDING_HINT.to_string()),
        },
    };

    if args.json {
        return Ok(serde_json::to_string_pretty(&status)?);
    }
    Ok(describe_status(&status))
}

fn describe_status(status: &PaydayStatus) -> String {
    let mut out = if status.is_today {
        "Today is payday!".to_string()
    } else {
        let unit = if status.days_until == 1 { "day" } else { "days" };
        format!(
            "{} {unit} until payday on {}.",
            status.days_until,
            status.next_payday.format("%Y-%m-%d")
        )
    };
    if let Some(salary) = status.salary_display() {
        out.push_str(&format!(" Salary: {salary}."));
    }
    out
}

fn describe_payday(payday: engine::Payday) -> String {
    if payday.is_last_day() {
        "the last day of each month".to_string()
    } else {
        format!("day {payday} of each month")
    }
}

fn format_amount(args: &FormatArgs) -> String {
    let money = Money::new(args.piasters);
    if args.decimals {
        money.format_with_decimals(args.currency)
    } else {
        money.format_whole(args.currency)
    }
}

fn convert(args: &ConvertArgs) -> Result<String> {
    let money = Money::from_major(args.pounds)?;
    Ok(format!(
        "{} = {} piasters",
        money.format_whole(Default::default()),
        money.minor()
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use engine::{Currency, FixedClock, Payday};
    use migration::MigratorTrait;
    use sea_orm::Database;

    use super::*;

    async fn engine_on(date: NaiveDate) -> Engine {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        Engine::builder()
            .database(db)
            .clock(Arc::new(FixedClock::on_date(date)))
            .build()
            .await
            .unwrap()
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn set_args(salary: &str, payday: i64) -> ProfileSetArgs {
        ProfileSetArgs {
            salary: salary.parse().unwrap(),
            payday: Payday::new(payday).unwrap(),
            currency: Currency::Egp,
        }
    }

    #[tokio::test]
    async fn show_without_profile_hints_onboarding() {
        let engine = engine_on(jan(15)).await;
        let out = run(
            Command::Profile(Profile {
                command: ProfileCommand::Show { json: false },
            }),
            &engine,
        )
        .await
        .unwrap();
        assert_eq!(out, ONBOARDING_HINT);
    }

    #[tokio::test]
    async fn set_then_countdown() {
        let engine = engine_on(jan(15)).await;
        let saved = set_profile(&engine, set_args("85,000", 25)).await.unwrap();
        assert_eq!(saved, "Profile saved: 85,000.00 EGP paid on day 25 of each month.");

        let out = payday_countdown(
            &engine,
            PaydayArgs {
                day: None,
                from: None,
                json: false,
            },
        )
        .await
        .unwrap();
        assert_eq!(out, "10 days until payday on 2026-01-25. Salary: 85,000 EGP.");
    }

    #[tokio::test]
    async fn countdown_with_explicit_rule_and_date() {
        let engine = engine_on(jan(15)).await;
        let out = payday_countdown(
            &engine,
            PaydayArgs {
                day: Some(Payday::LAST_DAY),
                from: Some(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
                json: false,
            },
        )
        .await
        .unwrap();
        assert_eq!(out, "Today is payday!");
    }

    #[tokio::test]
    async fn countdown_json_is_machine_readable() {
        let engine = engine_on(jan(26)).await;
        set_profile(&engine, set_args("1000", 25)).await.unwrap();
        let out = payday_countdown(
            &engine,
            PaydayArgs {
                day: None,
                from: None,
                json: true,
            },
        )
        .await
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["days_until"], 30);
        assert_eq!(value["next_payday"], "2026-02-25");
        assert_eq!(value["salary"], 100_000);
        assert_eq!(value["currency"], "EGP");
    }

    #[tokio::test]
    async fn countdown_for_bare_rule_omits_salary() {
        let engine = engine_on(jan(15)).await;
        set_profile(&engine, set_args("85,000", 25)).await.unwrap();
        let out = payday_countdown(
            &engine,
            PaydayArgs {
                day: Some(Payday::new(20).unwrap()),
                from: None,
                json: true,
            },
        )
        .await
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["days_until"], 5);
        assert!(value.get("salary").is_none());
        assert!(value.get("currency").is_none());
    }

    #[tokio::test]
    async fn reset_removes_profile() {
        let engine = engine_on(jan(15)).await;
        set_profile(&engine, set_args("1", 1)).await.unwrap();
        assert_eq!(reset_profile(&engine).await.unwrap(), "Removed 1 profile(s).");
        assert_eq!(show_profile(&engine, false).await.unwrap(), ONBOARDING_HINT);
    }

    #[test]
    fn formats_and_converts() {
        let whole = FormatArgs {
            piasters: 8_500_050,
            decimals: false,
            currency: Currency::Egp,
        };
        assert_eq!(format_amount(&whole), "85,000 EGP");
        let decimals = FormatArgs {
            decimals: true,
            ..whole
        };
        assert_eq!(format_amount(&decimals), "85,000.50 EGP");

        assert_eq!(
            convert(&ConvertArgs { pounds: 850 }).unwrap(),
            "850 EGP = 85000 piasters"
        );
        assert!(convert(&ConvertArgs { pounds: -1 }).is_err());
    }

    #[test]
    fn one_day_is_singular() {
        let status = PaydayStatus {
            today: jan(24),
            payday: Payday::new(25).unwrap(),
            next_payday: jan(25),
            days_until: 1,
            is_today: false,
            salary: None,
            currency: None,
        };
        assert_eq!(
            describe_status(&status),
            "1 day until payday on 2026-01-25."
        );
    }
}
