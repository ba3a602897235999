use crate::domain::entities::Terminal;

/// Terminal code the backend uses for its aggregate "all terminals" entry.
pub const ALL_TERMINALS_CODE: &str = "ALL";

/// One entry of a terminal selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalOption {
    pub value: String,
    pub label: String,
}

fn has_all_entry(terminals: &[Terminal]) -> bool {
    terminals
        .iter()
        .any(|terminal| terminal.code.as_deref() == Some(ALL_TERMINALS_CODE))
}

/// Selector entries; a manual "All" entry is added when the backend does not
/// provide one.
pub fn terminal_options(terminals: &[Terminal]) -> Vec<TerminalOption> {
    let mut options = Vec::with_capacity(terminals.len() + 1);
    if !has_all_entry(terminals) {
        options.push(TerminalOption {
            value: String::new(),
            label: "All".to_string(),
        });
    }
    options.extend(terminals.iter().map(|terminal| TerminalOption {
        value: terminal.option_value().to_string(),
        label: terminal.display_name().to_string(),
    }));
    options
}

/// Selection to use once terminals are known and nothing was chosen yet.
pub fn default_terminal_code(terminals: &[Terminal]) -> String {
    if has_all_entry(terminals) {
        ALL_TERMINALS_CODE.to_string()
    } else {
        String::new()
    }
}

/// Terminal code to send to the API, `None` for "every terminal".
pub fn terminal_filter(code: &str) -> Option<&str> {
    let trimmed = code.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_TERMINALS_CODE) {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal(code: Option<&str>, name: Option<&str>) -> Terminal {
        Terminal {
            id: None,
            code: code.map(str::to_string),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn manual_all_option_when_backend_has_none() {
        let terminals = vec![terminal(Some("NQ"), Some("North Quay")), terminal(None, None)];
        let options = terminal_options(&terminals);
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, "");
        assert_eq!(options[0].label, "All");
        assert_eq!(options[1].value, "NQ");
        assert_eq!(options[2].label, "Unknown Terminal");
        assert_eq!(default_terminal_code(&terminals), "");
    }

    #[test]
    fn backend_all_entry_is_used() {
        let terminals = vec![
            terminal(Some("ALL"), Some("All Terminals")),
            terminal(Some("SQ"), Some("South Quay")),
        ];
        let options = terminal_options(&terminals);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].label, "All Terminals");
        assert_eq!(default_terminal_code(&terminals), "ALL");
    }

    #[test]
    fn filter_treats_all_as_unfiltered() {
        assert_eq!(terminal_filter(""), None);
        assert_eq!(terminal_filter("all"), None);
        assert_eq!(terminal_filter("ALL"), None);
        assert_eq!(terminal_filter(" SQ "), Some("SQ"));
    }
}
