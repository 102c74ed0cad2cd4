/// All slash commands supported by the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Missions,
    Pick {
        selector: String,
    },
    Products,
    Add {
        selector: String,
        quantity: i64,
    },
    Cart,
    Clear,
    Submit,
    Reason {
        text: String,
    },
    ClearReasons,
    Reasons,
    Export {
        path: Option<String>,
    },
    Back,
    Restart,
    Status,
    Version,
    Help {
        command: Option<String>,
    },
    Exit,
}

/// Description of a command for help display.
pub struct CommandHelp {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub static COMMAND_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "missions",
        usage: "/missions",
        description: "List the available missions and their budgets",
    },
    CommandHelp {
        name: "pick",
        usage: "/pick <number|title>",
        description: "Choose a mission and start shopping with its budget",
    },
    CommandHelp {
        name: "products",
        usage: "/products",
        description: "List the catalog with numbers and unit prices",
    },
    CommandHelp {
        name: "add",
        usage: "/add <number|name> [quantity]",
        description: "Add a product to the cart. Quantity defaults to 1; repeated adds accumulate",
    },
    CommandHelp {
        name: "cart",
        usage: "/cart",
        description: "Show the cart, amount spent, remaining budget and whether you can submit",
    },
    CommandHelp {
        name: "clear",
        usage: "/clear",
        description: "Empty the cart",
    },
    CommandHelp {
        name: "submit",
        usage: "/submit",
        description: "Submit the cart. Requires at least one item and staying within budget",
    },
    CommandHelp {
        name: "reason",
        usage: "/reason <text> | /reason --clear",
        description: "Append a line to your purchase reasoning, or clear it",
    },
    CommandHelp {
        name: "reasons",
        usage: "/reasons",
        description: "Show the reasoning written so far",
    },
    CommandHelp {
        name: "export",
        usage: "/export [path]",
        description: "Render the PNG report. Defaults to the configured output directory",
    },
    CommandHelp {
        name: "back",
        usage: "/back",
        description: "Return from the result screen to shopping (only before submitting)",
    },
    CommandHelp {
        name: "restart",
        usage: "/restart",
        description: "Discard everything and return to mission selection",
    },
    CommandHelp {
        name: "status",
        usage: "/status",
        description: "Show the current step, mission and budget",
    },
    CommandHelp {
        name: "version",
        usage: "/version",
        description: "Show version and build info",
    },
    CommandHelp {
        name: "help",
        usage: "/help [command]",
        description: "Show help for all or a specific command",
    },
    CommandHelp {
        name: "exit",
        usage: "/exit",
        description: "Save the session and quit",
    },
];

/// All command names for tab completion.
pub static COMMAND_NAMES: &[&str] = &[
    "/missions",
    "/pick",
    "/products",
    "/add",
    "/cart",
    "/clear",
    "/submit",
    "/reason",
    "/reasons",
    "/export",
    "/back",
    "/restart",
    "/status",
    "/version",
    "/help",
    "/exit",
];

/// Parse a raw input line into a SlashCommand, or return an error message.
pub fn parse_command(input: &str) -> Result<SlashCommand, String> {
    let input = input.trim();
    if !input.starts_with('/') {
        return Err("Commands must start with /. Type /help for available commands.".into());
    }

    let (cmd, rest) = match input.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (input, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match cmd {
        "/missions" => Ok(SlashCommand::Missions),
        "/pick" => {
            if rest.is_empty() {
                return Err("Usage: /pick <number|title>".into());
            }
            Ok(SlashCommand::Pick { selector: rest.to_string() })
        }
        "/products" => Ok(SlashCommand::Products),
        "/add" => parse_add(&args),
        "/cart" => Ok(SlashCommand::Cart),
        "/clear" => Ok(SlashCommand::Clear),
        "/submit" => Ok(SlashCommand::Submit),
        "/reason" => match rest {
            "" => Err("Usage: /reason <text> | /reason --clear".into()),
            "--clear" => Ok(SlashCommand::ClearReasons),
            text => Ok(SlashCommand::Reason { text: text.to_string() }),
        },
        "/reasons" => Ok(SlashCommand::Reasons),
        "/export" => Ok(SlashCommand::Export {
            path: (!rest.is_empty()).then(|| rest.to_string()),
        }),
        "/back" => Ok(SlashCommand::Back),
        "/restart" => Ok(SlashCommand::Restart),
        "/status" => Ok(SlashCommand::Status),
        "/version" => Ok(SlashCommand::Version),
        "/help" => Ok(SlashCommand::Help {
            command: args.first().map(|s| s.trim_start_matches('/').to_string()),
        }),
        "/exit" | "/quit" | "/q" => Ok(SlashCommand::Exit),
        other => Err(format!("Unknown command: {}. Type /help for available commands.", other)),
    }
}

/// `/add <selector...> [quantity]`. The trailing token is the quantity only
/// when there is more than one token and it parses as an integer, so product
/// names with spaces still work.
fn parse_add(args: &[&str]) -> Result<SlashCommand, String> {
    match args {
        [] => Err("Usage: /add <number|name> [quantity]".into()),
        [selector] => Ok(SlashCommand::Add {
            selector: selector.to_string(),
            quantity: 1,
        }),
        [head @ .., last] => match last.parse::<i64>() {
            Ok(quantity) => Ok(SlashCommand::Add {
                selector: head.join(" "),
                quantity,
            }),
            Err(_) => Ok(SlashCommand::Add {
                selector: args.join(" "),
                quantity: 1,
            }),
        },
    }
}
