use crate::tt::DEFAULT_TT_MB;

/// Side effect the loop must perform after a `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UciOptionAction {
    ReinitHash(usize),
    SetMoveOverhead(u64),
    SetOwnBook(bool),
}

#[derive(Debug, Clone)]
pub struct UciOptions {
    pub hash_mb: usize,
    pub move_overhead_ms: u64,
    pub own_book: bool,
}

impl Default for UciOptions {
    fn default() -> Self {
        UciOptions::new(DEFAULT_TT_MB)
    }
}

impl UciOptions {
    #[must_use]
    pub fn new(hash_mb: usize) -> Self {
        UciOptions {
            hash_mb,
            move_overhead_ms: 50,
            own_book: false,
        }
    }

    pub fn print(&self) {
        println!("id name {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        println!("id author {}", env!("CARGO_PKG_AUTHORS"));
        println!("option name Hash type spin default {} min 1 max 65536", self.hash_mb);
        println!(
            "option name Move Overhead type spin default {} min 0 max 5000",
            self.move_overhead_ms
        );
        println!("option name OwnBook type check default {}", self.own_book);
        println!("uciok");
    }

    /// Apply one option. Names are case-insensitive; unparseable values
    /// leave the option unchanged.
    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) -> Option<UciOptionAction> {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "hash" => {
                let mb = value?.trim().parse::<usize>().ok()?.clamp(1, 65536);
                if mb != self.hash_mb {
                    self.hash_mb = mb;
                    return Some(UciOptionAction::ReinitHash(mb));
                }
            }
            "move overhead" => {
                let ms = value?.trim().parse::<u64>().ok()?.min(5000);
                self.move_overhead_ms = ms;
                return Some(UciOptionAction::SetMoveOverhead(ms));
            }
            "ownbook" => {
                let enabled = matches!(value?.trim().to_ascii_lowercase().as_str(), "true" | "1");
                self.own_book = enabled;
                return Some(UciOptionAction::SetOwnBook(enabled));
            }
            _ => log::warn!("unknown option: {name}"),
        }
        None
    }
}

#[must_use]
pub fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    if parts.first() != Some(&"setoption") {
        return None;
    }

    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut in_value = None;

    for part in parts.iter().skip(1) {
        match *part {
            "name" => in_value = Some(false),
            "value" => in_value = Some(true),
            _ => match in_value {
                Some(false) => name_parts.push(part),
                Some(true) => value_parts.push(part),
                None => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
    Some((name_parts.join(" "), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiword_names() {
        let parts = ["setoption", "name", "Move", "Overhead", "value", "30"];
        assert_eq!(
            parse_setoption(&parts),
            Some(("Move Overhead".to_string(), Some("30".to_string())))
        );
        assert_eq!(parse_setoption(&["setoption", "value", "1"]), None);
        assert_eq!(parse_setoption(&["position"]), None);
    }

    #[test]
    fn applies_known_options() {
        let mut options = UciOptions::new(16);
        assert_eq!(options.apply_setoption("Hash", Some("64")), Some(UciOptionAction::ReinitHash(64)));
        assert_eq!(options.apply_setoption("hash", Some("64")), None);
        assert_eq!(options.apply_setoption("Hash", Some("lots")), None);
        assert_eq!(options.hash_mb, 64);

        assert_eq!(
            options.apply_setoption("Move Overhead", Some("10")),
            Some(UciOptionAction::SetMoveOverhead(10))
        );
        assert_eq!(options.apply_setoption("OwnBook", Some("true")), Some(UciOptionAction::SetOwnBook(true)));
        assert!(options.own_book);
        assert_eq!(options.apply_setoption("Threads", Some("4")), None);
    }
}
