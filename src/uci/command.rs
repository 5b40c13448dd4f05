#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position(Vec<String>),
    Go(Vec<String>),
    Perft(usize),
    SetOption(Vec<String>),
    Stop,
    Quit,
    Unknown(String),
}

pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let trimmed = line.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let first = *parts.first()?;

    let owned_parts = || parts.iter().map(|p| (*p).to_string()).collect::<Vec<String>>();

    let cmd = match first {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(owned_parts()),
        "go" => UciCommand::Go(owned_parts()),
        "perft" => {
            let depth = parts.get(1).and_then(|v| v.parse::<usize>().ok()).unwrap_or(1);
            UciCommand::Perft(depth)
        }
        "setoption" => UciCommand::SetOption(owned_parts()),
        "stop" => UciCommand::Stop,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(trimmed.to_string()),
    };

    Some(cmd)
}

/// Arguments of a `go` command. Absent fields were not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoArgs {
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub movetime: Option<u64>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u64>,
    pub infinite: bool,
}

/// Parse `go ...` tokens. Unknown keywords and malformed numbers are skipped.
pub fn parse_go(parts: &[&str]) -> GoArgs {
    let mut args = GoArgs::default();
    let mut iter = parts.iter().skip(1);
    while let Some(&token) = iter.next() {
        if token == "infinite" {
            args.infinite = true;
            continue;
        }
        let slot = match token {
            "nodes" => &mut args.nodes,
            "movetime" => &mut args.movetime,
            "wtime" => &mut args.wtime,
            "btime" => &mut args.btime,
            "winc" => &mut args.winc,
            "binc" => &mut args.binc,
            "movestogo" => &mut args.movestogo,
            "depth" => {
                args.depth = iter.next().and_then(|v| v.parse().ok());
                continue;
            }
            _ => continue,
        };
        // Clocks can go negative in some GUIs; treat that as zero.
        *slot = iter
            .next()
            .and_then(|v| v.parse::<i64>().ok())
            .map(|v| v.max(0) as u64);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_commands() {
        assert_eq!(parse_uci_command("  isready "), Some(UciCommand::IsReady));
        assert_eq!(parse_uci_command(""), None);
        assert_eq!(parse_uci_command("perft 3"), Some(UciCommand::Perft(3)));
        assert_eq!(parse_uci_command("perft x"), Some(UciCommand::Perft(1)));
        assert_eq!(
            parse_uci_command("xyzzy 1"),
            Some(UciCommand::Unknown("xyzzy 1".to_string()))
        );
    }

    #[test]
    fn parses_go_arguments() {
        let parts: Vec<&str> = "go wtime 60000 btime -20 winc 1000 movestogo 12 depth 7".split(' ').collect();
        let args = parse_go(&parts);
        assert_eq!(args.wtime, Some(60_000));
        assert_eq!(args.btime, Some(0));
        assert_eq!(args.winc, Some(1000));
        assert_eq!(args.binc, None);
        assert_eq!(args.movestogo, Some(12));
        assert_eq!(args.depth, Some(7));
        assert!(!args.infinite);

        let args = parse_go(&["go", "infinite", "nodes", "5000"]);
        assert!(args.infinite);
        assert_eq!(args.nodes, Some(5000));
    }
}
