use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tunefetch")]
#[command(author, version, about = "Telegram bot that finds a song and sends it back as MP3", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot with long polling
    Run,

    /// Download one query through the same provider chain and print the file path
    Fetch {
        /// Song or artist name
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["tunefetch"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_fetch_collects_words() {
        let cli = Cli::try_parse_from(["tunefetch", "fetch", "Daft", "Punk"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Fetch {
                query: vec!["Daft".into(), "Punk".into()]
            })
        );
    }

    #[test]
    fn test_fetch_requires_query() {
        assert!(Cli::try_parse_from(["tunefetch", "fetch"]).is_err());
    }
}
