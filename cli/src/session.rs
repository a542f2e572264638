use scrollbox_common::url;
use scrollbox_common::EntryKind;
use scrollbox_runtime::*;

/// One line of the `run` input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open { url: String, prefix: String },
    Click(String),
    Toggle(String),
    Scroll(f64),
    Show,
}

impl Command {
    pub fn parse(input: &str) -> Option<Command> {
        let words: Vec<&str> = input.split_whitespace().collect();
        match words.as_slice() {
            ["open", url] => Some(Command::Open {
                url: url.to_string(),
                prefix: String::new(),
            }),
            ["open", url, prefix] => Some(Command::Open {
                url: url.to_string(),
                prefix: prefix.to_string(),
            }),
            // labels can have spaces in them
            ["click", query @ ..] if !query.is_empty() => Some(Command::Click(query.join(" "))),
            ["toggle", query @ ..] if !query.is_empty() => Some(Command::Toggle(query.join(" "))),
            ["scroll", offset] => offset.parse().ok().map(Command::Scroll),
            ["show"] => Some(Command::Show),
            _ => None,
        }
    }
}

/// A reader moving through the book: one sidebar, reloaded on every page,
/// and the session storage that outlives each load.
pub struct Session {
    sidebar: Sidebar,
    store: MemoryStore,
}

impl Session {
    pub fn new(sidebar: Sidebar) -> Self {
        Self {
            sidebar,
            store: MemoryStore::new(),
        }
    }

    pub fn run(&mut self, command: Command) -> Result<Vec<String>, RuntimeError> {
        match command {
            Command::Open { url, prefix } => Ok(self.open(url, prefix)),
            Command::Click(query) => self.click(&query),
            Command::Toggle(query) => {
                let entry_id = self.sidebar.find(&query)?;
                let state = self.sidebar.toggle(entry_id)?;
                let title = self.sidebar.tree.entries[entry_id].title();
                Ok(vec![format!("TOGGLE {}: {}", title, state)])
            }
            Command::Scroll(offset) => {
                let applied = self.sidebar.scroll_to(offset);
                Ok(vec![format!("SCROLL {}", applied)])
            }
            Command::Show => Ok(self.outline()),
        }
    }

    fn open(&mut self, url: String, prefix: String) -> Vec<String> {
        let mut lines = vec![format!("PAGE {}", url)];
        self.sidebar
            .initialize(PageContext::new(url, prefix), &mut self.store);

        let active = match self.sidebar.active() {
            Some(entry_id) => self.sidebar.tree.entries[entry_id].title(),
            None => "none".to_string(),
        };
        lines.push(format!("ACTIVE {}", active));
        lines.push(format!("scroll: {}", self.sidebar.scroll_top()));
        lines
    }

    fn click(&mut self, query: &str) -> Result<Vec<String>, RuntimeError> {
        let entry_id = self.sidebar.find(query)?;
        let target = self.sidebar.click(entry_id, &mut self.store)?;
        let mut lines = vec![format!("CLICK {}", target.href)];

        if url::is_absolute(&target.href) {
            lines.push(format!("LEAVE {}", target.absolute));
            return Ok(lines);
        }

        // the next page sits as deep as its root-relative href
        let prefix = if target.href.starts_with('#') {
            self.sidebar
                .page()
                .map(|page| page.root_prefix.clone())
                .unwrap_or_default()
        } else {
            let href = self.sidebar.tree.entries[entry_id].href().unwrap_or_default();
            url::path_to_root(href)
        };
        lines.extend(self.open(target.absolute, prefix));
        Ok(lines)
    }

    /// Visible rows, indented by depth, followed by the scroll offset.
    pub fn outline(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for entry_id in self.sidebar.visible_entries() {
            let entry = &self.sidebar.tree.entries[entry_id];
            let indent = "  ".repeat(entry.level);
            let row = match &entry.kind {
                EntryKind::Spacer => "---".to_string(),
                EntryKind::PartTitle(title) => format!("-- {} --", title),
                EntryKind::Chapter { .. } => {
                    let marker = if !entry.is_section() {
                        "  "
                    } else if self.sidebar.section_state(entry_id).is_expanded() {
                        "v "
                    } else {
                        "> "
                    };
                    let active = if self.sidebar.active_state(entry_id).is_active() {
                        " (active)"
                    } else {
                        ""
                    };
                    format!("{}{}{}", marker, entry.title(), active)
                }
            };
            lines.push(format!("{}{}", indent, row));
        }
        lines.push(format!("scroll: {}", self.sidebar.scroll_top()));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollbox_common::test_case::TestCase;
    use scrollbox_common::Config;

    fn guide_session() -> Session {
        let test_case = TestCase::from_string(
            include_str!("../../compatibility-tests/00000000005-toggle-sections.md"),
            "00000000005-toggle-sections.md",
        );
        Session::new(Sidebar::from_markup(&test_case.toc, Config::default()).unwrap())
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            Command::parse("open https://x/a.html ../"),
            Some(Command::Open {
                url: "https://x/a.html".to_string(),
                prefix: "../".to_string()
            })
        );
        assert_eq!(
            Command::parse("toggle TOML reference"),
            Some(Command::Toggle("TOML reference".to_string()))
        );
        assert_eq!(Command::parse("scroll 120.5"), Some(Command::Scroll(120.5)));
        assert_eq!(Command::parse(" show "), Some(Command::Show));
        assert_eq!(Command::parse("scroll up"), None);
        assert_eq!(Command::parse("click"), None);
        assert_eq!(Command::parse("jump 1"), None);
    }

    #[test]
    fn open_reports_page_active_entry_and_offset() {
        let mut session = guide_session();
        let lines = session
            .run(Command::parse("open https://docs.example/guide/install.html ../").unwrap())
            .unwrap();
        assert_eq!(
            lines,
            vec![
                "PAGE https://docs.example/guide/install.html",
                "ACTIVE 1.1. Install",
                "scroll: 0"
            ]
        );
    }

    #[test]
    fn click_loads_target_page_at_its_depth() {
        let mut session = guide_session();
        session
            .run(Command::parse("open https://docs.example/index.html").unwrap())
            .unwrap();

        let lines = session.run(Command::Click("1.2.1".to_string())).unwrap();

        assert_eq!(lines[0], "CLICK guide/config/toml.html");
        assert_eq!(lines[1], "PAGE https://docs.example/guide/config/toml.html");
        assert_eq!(lines[2], "ACTIVE 1.2.1. TOML reference");
        assert_eq!(
            session.sidebar.page().map(|p| p.root_prefix.as_str()),
            Some("../../")
        );
    }

    #[test]
    fn outline_hides_collapsed_children() {
        let session = guide_session();
        assert_eq!(
            session.outline(),
            vec![
                "  Preface",
                "---",
                "-- Guide --",
                "> 1. Setup",
                "  2. Roadmap",
                "scroll: 0"
            ]
        );
    }

    #[test]
    fn errors_leave_the_session_usable() {
        let mut session = guide_session();
        assert_eq!(
            session.run(Command::Toggle("nope".to_string())),
            Err(RuntimeError::EntryNotFound {
                query: "nope".to_string()
            })
        );
        assert!(session.run(Command::Toggle("1".to_string())).is_ok());
    }
}
