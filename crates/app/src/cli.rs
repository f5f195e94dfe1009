use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{Currency, Money, Payday};

#[derive(Parser, Debug)]
#[command(name = "flosyn")]
#[command(about = "Track your salary and count down to payday")]
pub struct Cli {
    /// Optional settings file path (TOML).
    #[arg(long)]
    pub config: Option<String>,

    /// Database connection string, overrides the settings file.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Override the time zone (IANA name) used for "today".
    #[arg(long)]
    pub timezone: Option<String>,

    /// Override the log level.
    #[arg(long)]
    pub level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show, set up or reset the salary profile.
    Profile(Profile),
    /// Days until the next payday.
    Payday(PaydayArgs),
    /// Format an amount of piasters for display.
    Format(FormatArgs),
    /// Convert whole pounds into piasters.
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
pub struct Profile {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    Show {
        #[arg(long)]
        json: bool,
    },
    Set(ProfileSetArgs),
    Reset,
}

#[derive(Args, Debug)]
pub struct ProfileSetArgs {
    /// Monthly salary in pounds, e.g. `85,000` or `85000.50`.
    #[arg(long)]
    pub salary: Money,
    /// Day of month (1-31), or `0`/`last` for the last day of the month.
    #[arg(long)]
    pub payday: Payday,
    #[arg(long, default_value = "EGP")]
    pub currency: Currency,
}

#[derive(Args, Debug)]
pub struct PaydayArgs {
    /// Use this payday rule instead of the stored profile.
    #[arg(long)]
    pub day: Option<Payday>,
    /// Count from this date (YYYY-MM-DD) instead of today.
    #[arg(long)]
    pub from: Option<NaiveDate>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Amount in piasters.
    #[arg(allow_negative_numbers = true)]
    pub piasters: i64,
    /// Keep the piasters, e.g. `85,000.50 EGP`.
    #[arg(long)]
    pub decimals: bool,
    #[arg(long, default_value = "EGP")]
    pub currency: Currency,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Whole pounds; must not be negative.
    #[arg(allow_negative_numbers = true)]
    pub pounds: i64,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_profile_set() {
        let cli = Cli::try_parse_from([
            "flosyn", "profile", "set", "--salary", "85,000", "--payday", "last",
        ])
        .unwrap();
        let Command::Profile(Profile {
            command: ProfileCommand::Set(args),
        }) = cli.command
        else {
            panic!("expected profile set");
        };
        assert_eq!(args.salary, Money::new(8_500_000));
        assert_eq!(args.payday, Payday::LAST_DAY);
        assert_eq!(args.currency, Currency::Egp);
    }

    #[test]
    fn rejects_invalid_payday() {
        assert!(
            Cli::try_parse_from(["flosyn", "profile", "set", "--salary", "1", "--payday", "32"])
                .is_err()
        );
    }

    #[test]
    fn parses_negative_piasters() {
        let cli = Cli::try_parse_from(["flosyn", "format", "-8500050", "--decimals"]).unwrap();
        let Command::Format(args) = cli.command else {
            panic!("expected format");
        };
        assert_eq!(args.piasters, -8_500_050);
        assert!(args.decimals);
    }
}
