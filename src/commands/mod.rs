//! Commands Module
//!
//! Command table and dispatch for the interactive REPL.
//!
//! # Commands
//! - `help` - Show usage
//! - `exit` - Leave the Pokedex
//! - `map` / `mapb` - Page forward/back through location areas
//! - `explore <area>` - List Pokemon in a location area
//! - `catch <pokemon>` - Try to catch a Pokemon
//! - `inspect <pokemon>` - Show a caught Pokemon
//! - `pokedex` - List caught Pokemon
//! - `stats` - Show response cache statistics

pub mod handlers;

pub use handlers::Session;

/// Every command the REPL understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
    Stats,
}

/// Name, usage line and description of a command.
#[derive(Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    pub command: Command,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        usage: "help",
        description: "Displays a help message",
        command: Command::Help,
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        description: "Exit the Pokedex",
        command: Command::Exit,
    },
    CommandSpec {
        name: "map",
        usage: "map",
        description: "Display the next 20 location areas",
        command: Command::Map,
    },
    CommandSpec {
        name: "mapb",
        usage: "mapb",
        description: "Display the previous 20 location areas",
        command: Command::MapBack,
    },
    CommandSpec {
        name: "explore",
        usage: "explore <location_area>",
        description: "List the Pokemon found in a location area",
        command: Command::Explore,
    },
    CommandSpec {
        name: "catch",
        usage: "catch <pokemon>",
        description: "Attempt to catch a Pokemon",
        command: Command::Catch,
    },
    CommandSpec {
        name: "inspect",
        usage: "inspect <pokemon>",
        description: "View details about a caught Pokemon",
        command: Command::Inspect,
    },
    CommandSpec {
        name: "pokedex",
        usage: "pokedex",
        description: "List all caught Pokemon",
        command: Command::Pokedex,
    },
    CommandSpec {
        name: "stats",
        usage: "stats",
        description: "Show response cache statistics",
        command: Command::Stats,
    },
];

/// What the REPL loop should do after a line was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text (possibly empty) and read the next line
    Continue(String),
    Exit,
}

/// Lower-cases `line` and splits it on whitespace.
pub fn clean_input(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_lowercase).collect()
}

pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Parses and runs one input line.
///
/// Blank lines and unknown commands are not errors; errors come only from a
/// command that ran and failed.
pub async fn dispatch(session: &mut Session, line: &str) -> anyhow::Result<Outcome> {
    let words = clean_input(line);
    let Some((name, args)) = words.split_first() else {
        return Ok(Outcome::Continue(String::new()));
    };
    let arg = args.first().map(String::as_str);

    let Some(spec) = lookup(name) else {
        return Ok(Outcome::Continue(
            "Unknown command. Type 'help' to see the list of available commands.\n".to_string(),
        ));
    };

    let text = match spec.command {
        Command::Help => handlers::help(),
        Command::Exit => return Ok(Outcome::Exit),
        Command::Map => handlers::map(session).await?,
        Command::MapBack => handlers::map_back(session).await?,
        Command::Explore => handlers::explore(session, arg).await?,
        Command::Catch => handlers::catch(session, arg).await?,
        Command::Inspect => handlers::inspect(session, arg).await?,
        Command::Pokedex => handlers::pokedex(session).await?,
        Command::Stats => handlers::stats(session).await?,
    };
    Ok(Outcome::Continue(text))
}
