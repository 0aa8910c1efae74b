use crate::error::SimError;
use crate::simulation::Scenario;
use crate::views::Page;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    SetScenario(Scenario),
    Navigate(Page),
    Show,
    Status,
    Export,
    Upload(String),
    Quit,
}

impl FromStr for Command {
    type Err = SimError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let line = input.trim();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };

        match (verb.to_lowercase().as_str(), arg) {
            ("start", "") => Ok(Command::Start),
            ("stop", "") => Ok(Command::Stop),
            ("scenario" | "mode", name) if !name.is_empty() => {
                Ok(Command::SetScenario(name.parse()?))
            }
            ("page" | "goto", name) if !name.is_empty() => Ok(Command::Navigate(name.parse()?)),
            ("show" | "render", "") => Ok(Command::Show),
            ("status" | "info", "") => Ok(Command::Status),
            ("export", "") => Ok(Command::Export),
            ("upload", name) if !name.is_empty() => Ok(Command::Upload(name.to_string())),
            ("q" | "quit" | "exit", "") => Ok(Command::Quit),
            (name, "") => name
                .parse::<Page>()
                .map(Command::Navigate)
                .map_err(|_| SimError::UnknownCommand(line.to_string())),
            _ => Err(SimError::UnknownCommand(line.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("start".parse::<Command>().unwrap(), Command::Start);
        assert_eq!("  STOP ".parse::<Command>().unwrap(), Command::Stop);
        assert_eq!(
            "scenario dos".parse::<Command>().unwrap(),
            Command::SetScenario(Scenario::Dos)
        );
        assert_eq!(
            "page visualizations".parse::<Command>().unwrap(),
            Command::Navigate(Page::Visualizations)
        );
        assert_eq!("help".parse::<Command>().unwrap(), Command::Navigate(Page::Help));
        assert_eq!("live".parse::<Command>().unwrap(), Command::Navigate(Page::Live));
        assert_eq!(
            "upload capture.pcap".parse::<Command>().unwrap(),
            Command::Upload("capture.pcap".into())
        );
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "scenario flood".parse::<Command>(),
            Err(SimError::InvalidScenario(_))
        ));
        assert!(matches!("page nowhere".parse::<Command>(), Err(SimError::InvalidPage(_))));
        assert!(matches!("dance".parse::<Command>(), Err(SimError::UnknownCommand(_))));
        assert!(matches!("start now".parse::<Command>(), Err(SimError::UnknownCommand(_))));
        assert!(matches!("scenario".parse::<Command>(), Err(SimError::UnknownCommand(_))));
    }
}
