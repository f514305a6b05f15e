//! Command parser for the : command system

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch tab; the name is validated by the app
    Tab(String),
    /// Re-check backend status
    Refresh,
    /// Reload the tool list
    Tools,
    /// Quick test, optionally replacing the message field first
    Test(Option<String>),
    /// Save the config form on the current tab
    Save,
    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Tab names accepted without the `tab` prefix
const BARE_TAB_NAMES: [&str; 5] = [
    "dashboard",
    "mcp-config",
    "llm-config",
    "dingtalk-config",
    "test-tools",
];

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        "tab" | "t" => {
            if let Some(name) = args {
                Command::Tab(name)
            } else {
                Command::Unknown(input.to_string())
            }
        }
        "refresh" | "status" => Command::Refresh,
        "tools" => Command::Tools,
        "test" => Command::Test(args),
        "save" | "w" => Command::Save,
        "help" | "?" => Command::Help,
        "quit" | "q" => Command::Quit,
        name if BARE_TAB_NAMES.contains(&name) => Command::Tab(name.to_string()),
        _ => Command::Unknown(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tab_commands() {
        assert_eq!(
            parse_command("tab mcp-config"),
            Command::Tab("mcp-config".to_string())
        );
        assert_eq!(
            parse_command("test-tools"),
            Command::Tab("test-tools".to_string())
        );
        assert_eq!(parse_command("tab"), Command::Unknown("tab".to_string()));
        // validated later, not here
        assert_eq!(parse_command("tab nope"), Command::Tab("nope".to_string()));
    }

    #[test]
    fn test_parse_test_keeps_message_verbatim() {
        assert_eq!(parse_command("test"), Command::Test(None));
        assert_eq!(
            parse_command("test 查看 default 命名空间的 pods"),
            Command::Test(Some("查看 default 命名空间的 pods".to_string()))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("refresh"), Command::Refresh);
        assert_eq!(parse_command(" tools "), Command::Tools);
        assert_eq!(parse_command("save"), Command::Save);
        assert_eq!(parse_command("q"), Command::Quit);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
    }
}
