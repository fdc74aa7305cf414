//! Slash-command routing.
//!
//! Commands are matched against an explicit table keyed by verb, each entry
//! declaring whether it captures an argument. The table is fixed at startup;
//! there is no ordering ambiguity between overlapping patterns.

/// A parsed inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Analyze { symbol: String },
    Levels { symbol: String },
    Poll,
    BloodMoon,
}

/// Outcome of routing one inbound text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Text started with the command marker and matched the table.
    Command(Command),
    /// Text started with the command marker but matched nothing (or was
    /// missing a required argument).
    UnknownCommand,
    /// Plain text; handled by the intent classifier instead.
    Text,
}

struct CommandSpec {
    verb: &'static str,
    takes_arg: bool,
    build: fn(Option<&str>) -> Option<Command>,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        verb: "analyze",
        takes_arg: true,
        build: |arg| {
            arg.map(|symbol| Command::Analyze {
                symbol: symbol.to_string(),
            })
        },
    },
    CommandSpec {
        verb: "levels",
        takes_arg: true,
        build: |arg| {
            arg.map(|symbol| Command::Levels {
                symbol: symbol.to_string(),
            })
        },
    },
    CommandSpec {
        verb: "poll",
        takes_arg: false,
        build: |_| Some(Command::Poll),
    },
    CommandSpec {
        verb: "bloodmoon",
        takes_arg: false,
        build: |_| Some(Command::BloodMoon),
    },
];

/// Route one inbound text.
///
/// Only `/`-prefixed text is considered here; everything else is left to the
/// intent classifier. The `/verb@BotName` form used in Telegram groups is
/// accepted.
pub fn route(text: &str) -> Route {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Route::Text;
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or("");
    let verb = verb.split('@').next().unwrap_or(verb);
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    for spec in COMMANDS {
        if spec.verb != verb {
            continue;
        }
        if spec.takes_arg && arg.is_none() {
            return Route::UnknownCommand;
        }
        return match (spec.build)(arg) {
            Some(command) => Route::Command(command),
            None => Route::UnknownCommand,
        };
    }

    Route::UnknownCommand
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_captures_the_symbol() {
        assert_eq!(
            route("/analyze BTC"),
            Route::Command(Command::Analyze {
                symbol: "BTC".to_string()
            })
        );
    }

    #[test]
    fn levels_captures_unrecognized_symbols_too() {
        assert_eq!(
            route("/levels xyz"),
            Route::Command(Command::Levels {
                symbol: "xyz".to_string()
            })
        );
    }

    #[test]
    fn zero_arity_commands_match_bare() {
        assert_eq!(route("/poll"), Route::Command(Command::Poll));
        assert_eq!(route("/bloodmoon"), Route::Command(Command::BloodMoon));
    }

    #[test]
    fn group_mention_suffix_is_stripped() {
        assert_eq!(route("/poll@ChainPulseBot"), Route::Command(Command::Poll));
    }

    #[test]
    fn missing_required_argument_is_unknown() {
        assert_eq!(route("/analyze"), Route::UnknownCommand);
        assert_eq!(route("/levels  "), Route::UnknownCommand);
    }

    #[test]
    fn unregistered_verbs_are_unknown() {
        assert_eq!(route("/start"), Route::UnknownCommand);
    }

    #[test]
    fn plain_text_is_not_routed_here() {
        assert_eq!(route("what is the price of bitcoin"), Route::Text);
    }
}
