use crate::models::TagMask;
use serde::{Deserialize, Serialize};

/// A placement rule matched once when a client is first managed. A
/// `None` filter matches anything; set filters are substring matches.
/// All matching rules apply: tags accumulate with OR, while the
/// floating flag and monitor index take the last match's value.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct WindowRule {
    pub class: Option<String>,
    pub instance: Option<String>,
    pub title: Option<String>,
    pub tags: TagMask,
    pub floating: bool,
    pub monitor: Option<usize>,
}

impl WindowRule {
    pub fn matches(&self, class: &str, instance: &str, title: &str) -> bool {
        let filter = |pattern: &Option<String>, value: &str| match pattern {
            Some(p) => value.contains(p.as_str()),
            None => true,
        };
        filter(&self.class, class) && filter(&self.instance, instance) && filter(&self.title, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rule_matches_everything() {
        let rule = WindowRule::default();
        assert!(rule.matches("Firefox", "Navigator", "anything"));
    }

    #[test]
    fn filters_are_substring_matches() {
        let rule = WindowRule {
            class: Some("fox".into()),
            ..WindowRule::default()
        };
        assert!(rule.matches("Firefox", "", ""));
        assert!(!rule.matches("Chromium", "", ""));
    }

    #[test]
    fn all_set_filters_must_match() {
        let rule = WindowRule {
            class: Some("term".into()),
            title: Some("vim".into()),
            ..WindowRule::default()
        };
        assert!(rule.matches("xterm", "", "vim notes.txt"));
        assert!(!rule.matches("xterm", "", "htop"));
    }
}
