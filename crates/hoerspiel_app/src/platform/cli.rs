use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use hoerspiel_core::{FilterMode, Layout, Msg};

/// Browse German audio-play releases from the iTunes catalog.
#[derive(Debug, Parser)]
#[command(name = "hoerspiel_app", version, about, long_about = None)]
pub struct Cli {
    /// Filter for the series page
    #[arg(long, global = true, value_enum, ignore_case = true, default_value_t = FilterArg::All)]
    pub filter: FilterArg,

    /// Render a table instead of cards
    #[arg(long, global = true)]
    pub table: bool,

    /// Settings file (default ./hoerspiel.ron)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Featured series side by side (default)
    Landing,
    /// Full catalog of one series; the configured series when TERM is omitted
    Series {
        #[arg(value_name = "TERM")]
        term: Vec<String>,
    },
    /// Free-text search
    Search {
        #[arg(value_name = "QUERY", required = true)]
        query: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    #[value(alias = "alle")]
    All,
    #[value(alias = "klassiker")]
    Classic,
    #[value(alias = "specials")]
    Special,
}

impl From<FilterArg> for FilterMode {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => FilterMode::All,
            FilterArg::Classic => FilterMode::Classic,
            FilterArg::Special => FilterMode::Special,
        }
    }
}

impl Cli {
    pub fn layout(&self) -> Layout {
        if self.table {
            Layout::Table
        } else {
            Layout::Grid
        }
    }

    /// UI messages that reproduce this invocation.
    pub fn messages(&self, default_series: &str) -> Vec<Msg> {
        let mut messages = vec![Msg::LayoutChanged(self.layout())];
        match self.command.as_ref().unwrap_or(&Command::Landing) {
            Command::Landing => messages.push(Msg::OpenLanding),
            Command::Series { term } => {
                let term = term.join(" ");
                messages.push(Msg::OpenSeries {
                    term: if term.trim().is_empty() {
                        default_series.to_string()
                    } else {
                        term
                    },
                });
            }
            Command::Search { query } => {
                messages.push(Msg::OpenSearch);
                messages.push(Msg::QueryChanged(query.join(" ")));
                messages.push(Msg::QuerySubmitted);
            }
        }
        messages.push(Msg::FilterChanged(self.filter.into()));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("hoerspiel_app").chain(args.iter().copied()))
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_opens_landing() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.layout(), Layout::Grid);
        assert_eq!(
            cli.messages("Benjamin Blümchen"),
            vec![
                Msg::LayoutChanged(Layout::Grid),
                Msg::OpenLanding,
                Msg::FilterChanged(FilterMode::All),
            ]
        );
    }

    #[test]
    fn series_joins_term_and_reads_flags() {
        let cli = parse(&["series", "Bibi", "Blocksberg", "--filter", "Klassiker", "--table"])
            .unwrap();
        assert_eq!(
            cli.messages("unused"),
            vec![
                Msg::LayoutChanged(Layout::Table),
                Msg::OpenSeries {
                    term: "Bibi Blocksberg".to_string()
                },
                Msg::FilterChanged(FilterMode::Classic),
            ]
        );
    }

    #[test]
    fn series_without_term_uses_default() {
        let cli = parse(&["series"]).unwrap();
        let messages = cli.messages("Benjamin Blümchen");
        assert!(messages.contains(&Msg::OpenSeries {
            term: "Benjamin Blümchen".to_string()
        }));
    }

    #[test]
    fn search_submits_query() {
        let cli = parse(&["search", "Die", "drei", "???"]).unwrap();
        let messages = cli.messages("unused");
        assert_eq!(
            &messages[1..4],
            &[
                Msg::OpenSearch,
                Msg::QueryChanged("Die drei ???".to_string()),
                Msg::QuerySubmitted,
            ]
        );
    }

    #[test]
    fn options_are_accepted_before_the_page() {
        let cli = parse(&["--config", "/tmp/h.ron", "--filter", "specials", "series"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/h.ron")));
        assert_eq!(cli.filter, FilterArg::Special);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["search"]).is_err());
        assert!(parse(&["--filter"]).is_err());
        assert!(parse(&["--filter", "neu"]).is_err());
        assert!(parse(&["--laut"]).is_err());
        assert!(parse(&["kalender"]).is_err());
    }
}
