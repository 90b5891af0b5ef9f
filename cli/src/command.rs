use anyhow::{Context, bail};
use std::str::FromStr;
use sweeper_core::{Coord, Coord2};

/// A single line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r ROW COL    reveal a cell
  f ROW COL    place or remove a flag
  h            show this help
  q            quit";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("Empty command, type `h` for help");
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Command::Flag(parse_coords(&mut words)?),
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => bail!("Unknown command `{other}`, type `h` for help"),
        };

        if let Some(extra) = words.next() {
            bail!("Unexpected argument `{extra}`");
        }
        Ok(command)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let row = parse_coord(words.next(), "row")?;
    let col = parse_coord(words.next(), "column")?;
    Ok((row, col))
}

fn parse_coord(word: Option<&str>, name: &str) -> anyhow::Result<Coord> {
    let Some(word) = word else {
        bail!("Missing {name}");
    };
    word.parse()
        .with_context(|| format!("Invalid {name} `{word}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!("r 1 2".parse::<Command>().unwrap(), Command::Reveal((1, 2)));
        assert_eq!("  FLAG 0   7 ".parse::<Command>().unwrap(), Command::Flag((0, 7)));
        assert_eq!("reveal 10 3".parse::<Command>().unwrap(), Command::Reveal((10, 3)));
    }

    #[test]
    fn parses_control_commands() {
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("help".parse::<Command>().unwrap(), Command::Help);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("".parse::<Command>().is_err());
        assert!("r 1".parse::<Command>().is_err());
        assert!("r 1 x".parse::<Command>().is_err());
        assert!("r 1 2 3".parse::<Command>().is_err());
        assert!("f -1 0".parse::<Command>().is_err());
        assert!("f 256 0".parse::<Command>().is_err());
        assert!("dig 1 1".parse::<Command>().is_err());
    }

    #[test]
    fn error_names_the_bad_word() {
        let err = "r 4 abc".parse::<Command>().unwrap_err();

        assert!(format!("{err:#}").contains("Invalid column `abc`"));
    }
}
